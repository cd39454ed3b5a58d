//! Property-based invariant tests for page chrome and links.
//!
//! 1. Element text reads back exactly what was written.
//! 2. After any show/hide sequence, visibility equals the last operation.
//! 3. Anchor activation depends only on `href` and whether `target` is `_blank`.
//! 4. The availability contract passes iff all three expectations hold.

use cactat_page::anchor::{Anchor, Navigation};
use cactat_page::{AvailabilityContract, ElementId, HttpResponse, Page};
use proptest::prelude::*;

fn element_strategy() -> impl Strategy<Value = ElementId> {
    prop::sample::select(ElementId::ALL.to_vec())
}

proptest! {
    #[test]
    fn text_round_trips(id in element_strategy(), text in any::<String>()) {
        let mut page = Page::new();
        page.set_text(id, &text);
        prop_assert_eq!(page.element(id).text(), text.as_str());
    }

    #[test]
    fn visibility_follows_last_toggle(
        id in element_strategy(),
        ops in prop::collection::vec(any::<bool>(), 1..20),
    ) {
        let mut page = Page::new();
        for &show in &ops {
            if show { page.show(id) } else { page.hide(id) }
        }
        prop_assert_eq!(page.element(id).is_visible(), *ops.last().unwrap());
    }

    #[test]
    fn activation_depends_on_target(
        href in "[a-z]{1,10}\\.html",
        target in prop_oneof![Just(None), Just(Some("_blank".to_string())), "[a-z_]{1,8}".prop_map(Some)],
    ) {
        let mut link = Anchor::new("link", href.clone());
        if let Some(t) = &target {
            link.set_attr("target", t.clone());
        }
        let expected = if target.as_deref() == Some("_blank") {
            Navigation::NewTab { href }
        } else {
            Navigation::CurrentContext { href }
        };
        prop_assert_eq!(link.activate(), expected);
    }

    #[test]
    fn contract_checks_all_three(
        status in prop_oneof![Just(200u16), 100u16..600],
        reason in prop_oneof![Just("OK".to_string()), "[A-Za-z ]{0,12}"],
        body in prop_oneof![Just("<h1>CAC TAT</h1>".to_string()), "[a-z ]{0,30}"],
    ) {
        let response = HttpResponse { status, reason: reason.clone(), body: body.clone() };
        let expected = status == 200 && reason == "OK" && body.contains("CAC TAT");
        prop_assert_eq!(AvailabilityContract::default().check(&response).is_ok(), expected);
    }
}
