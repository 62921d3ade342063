//! Normalization of backend payloads into episodes
//!
//! Uses payloads shaped like the REST backend's `/episodes` response.

use podcastr_core::{parse_episodes, CoreError, EpisodeCatalog};

const PAYLOAD: &str = r#"[
  {
    "id": "a-importancia-da-contribuicao-em-open-source",
    "title": "Faladev #30 | A importância da contribuição em Open Source",
    "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
    "published_at": "2021-01-22 11:00:00",
    "thumbnail": "https://cdn/opensource.jpg",
    "description": "<p>Neste Faladev...</p>",
    "file": {
      "url": "https://cdn/opensource.m4a",
      "type": "audio/x-m4a",
      "duration": 3981
    }
  },
  {
    "id": "uma-conversa-sobre-programacao-funcional-e-elixir",
    "title": "Faladev #29 | Uma conversa sobre programação funcional e Elixir",
    "members": "Diego Fernandes, João Pedro e Vinicius Rodrigues",
    "published_at": "2021-01-14 11:00:00",
    "thumbnail": "https://cdn/elixir.jpg",
    "description": "<p>Neste Faladev...</p>",
    "file": {
      "url": "https://cdn/elixir.m4a",
      "type": "audio/x-m4a",
      "duration": "3365"
    }
  },
  {
    "id": "como-comecar-na-programacao-em-2021-do-jeito-certo",
    "title": "Faladev #28 | Como começar na programação em 2021 do jeito certo",
    "members": "Diego Fernandes, João Pedro e Mayk Brito",
    "published_at": "2021-01-30T11:00:00Z",
    "thumbnail": "https://cdn/comecar.jpg",
    "file": {
      "url": "https://cdn/comecar.m4a",
      "duration": 3526.4
    }
  }
]"#;

#[test]
fn payload_parses_and_keeps_fetch_order() {
    let episodes = parse_episodes(PAYLOAD).unwrap();

    assert_eq!(episodes.len(), 3);
    assert_eq!(episodes[0].duration, 3981);
    assert_eq!(episodes[0].duration_as_string(), "66:21");
    assert_eq!(episodes[1].duration, 3365);
    assert_eq!(episodes[2].duration, 3526);
    assert!(episodes[2].description.is_none());
    assert_eq!(episodes[1].published_label().as_deref(), Some("14 Jan 21"));
}

#[test]
fn catalog_from_payload_orders_newest_first() {
    let catalog = EpisodeCatalog::new(parse_episodes(PAYLOAD).unwrap(), 2);

    let latest: Vec<&str> = catalog.latest().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        latest,
        vec![
            "como-comecar-na-programacao-em-2021-do-jeito-certo",
            "a-importancia-da-contribuicao-em-open-source",
        ]
    );
    assert_eq!(catalog.others().len(), 1);
}

#[test]
fn malformed_json_is_a_serialization_error() {
    assert!(matches!(
        parse_episodes("{ not json"),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn first_bad_record_aborts_the_parse() {
    let payload = r#"[
      { "id": "ok", "title": "Ok", "members": "", "file": { "url": "https://cdn/ok.mp3", "duration": 10 } },
      { "id": "bad", "title": "Bad", "members": "", "file": { "url": "https://cdn/bad.mp3", "duration": -4 } }
    ]"#;

    assert!(matches!(
        parse_episodes(payload),
        Err(CoreError::InvalidDuration(_))
    ));
}
