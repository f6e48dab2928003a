fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use bingo_protocol::{CardRequest, CardResponse, GameAnnouncement, Message, MessageKind};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (key-order independent).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    /// Parses a fixture through the untagged envelope and checks the variant.
    fn envelope_kind(name: &str) -> MessageKind {
        roundtrip_test::<Message>(name).kind()
    }

    // --- Message bodies ---

    #[test]
    fn fixture_game_announcement() {
        let announcement = roundtrip_test::<GameAnnouncement>("game_announcement.json");
        assert_eq!(announcement.title, "Movie Night");
        assert_eq!(announcement.items.len(), 24);
    }

    #[test]
    fn fixture_card_request() {
        let request = roundtrip_test::<CardRequest>("card_request.json");
        assert_eq!(request, CardRequest::get_card());
    }

    #[test]
    fn fixture_card_response() {
        let response = roundtrip_test::<CardResponse>("card_response.json");
        assert_eq!(response.card.len(), 24);
        assert!(!response.card.iter().any(|item| item == "FREE"));
    }

    // --- Envelope recognition ---

    #[test]
    fn envelope_recognises_each_fixture() {
        assert_eq!(
            envelope_kind("game_announcement.json"),
            MessageKind::Announcement
        );
        assert_eq!(envelope_kind("card_request.json"), MessageKind::Request);
        assert_eq!(envelope_kind("card_response.json"), MessageKind::Response);
    }

    #[test]
    fn dealt_card_is_a_permutation_of_announced_items() {
        let announcement: GameAnnouncement =
            serde_json::from_value(load_fixture("game_announcement.json")).unwrap();
        let response: CardResponse =
            serde_json::from_value(load_fixture("card_response.json")).unwrap();

        let mut announced = announcement.items;
        let mut dealt = response.card;
        announced.sort();
        dealt.sort();
        assert_eq!(announced, dealt);
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let value = serde_json::json!({"action": "get_card", "player": "Sam"});
        let msg: Message = serde_json::from_value(value).unwrap();
        assert_eq!(msg.kind(), MessageKind::Request);
    }
}
