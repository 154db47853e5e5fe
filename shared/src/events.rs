/// What a user did, independent of the markup that captured it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    SelectTrack(u32),
    SelectRacer(u32),
    SubmitRace,
    Accelerate,
}

pub const SUBMIT_ELEMENT_ID: &str = "submit-create-race";
pub const ACCELERATE_ELEMENT_ID: &str = "gas-peddle";

/// Selector matching every element `classify` understands, for `closest()`.
pub const INTERACTIVE_SELECTOR: &str = ".card.track, .card.podracer, #submit-create-race, #gas-peddle";

/// Map an activated element (its class list, element id and `data-id`) to an event.
pub fn classify(class_name: &str, element_id: &str, data_id: Option<&str>) -> Option<UiEvent> {
    let has = |class: &str| class_name.split_whitespace().any(|c| c == class);
    let card_id = || data_id.and_then(|raw| raw.trim().parse::<u32>().ok());

    if has("card") && has("track") {
        card_id().map(UiEvent::SelectTrack)
    } else if has("card") && has("podracer") {
        card_id().map(UiEvent::SelectRacer)
    } else if element_id == SUBMIT_ELEMENT_ID {
        Some(UiEvent::SubmitRace)
    } else if element_id == ACCELERATE_ELEMENT_ID {
        Some(UiEvent::Accelerate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards() {
        assert_eq!(classify("card track", "track-2", Some("2")), Some(UiEvent::SelectTrack(2)));
        assert_eq!(
            classify("card podracer selected", "racer-5", Some("5")),
            Some(UiEvent::SelectRacer(5))
        );
        assert_eq!(classify("card track", "track-x", Some("x")), None);
        assert_eq!(classify("track", "track-2", Some("2")), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(classify("", "submit-create-race", None), Some(UiEvent::SubmitRace));
        assert_eq!(classify("btn", "gas-peddle", None), Some(UiEvent::Accelerate));
        assert_eq!(classify("", "tracks", None), None);
    }
}
