use seeker::{Entries, Item, MatchOptions, PatternMatcher, SearchEngine, SearchError, SearchOptions};
use serde_json::json;

#[test]
fn test_closer_strings_rank_first() {
    let entries = Entries::from(vec!["old man", "ole man", "mango"]);
    let engine = SearchEngine::new(&entries, SearchOptions::default());

    assert_eq!(
        engine.search_items("old").unwrap(),
        vec![Item::Text("old man"), Item::Text("ole man")]
    );
}

#[test]
fn test_forty_char_pattern_rejected() {
    let err = PatternMatcher::new(&"abcdefghij".repeat(4), MatchOptions::default()).unwrap_err();
    assert_eq!(err, SearchError::InvalidPattern { len: 40 });
}

#[test]
fn test_books_by_title_or_author() {
    let books = Entries::from_values(vec![
        json!({"isbn": "1", "title": "Old Man's War", "author": "John Scalzi"}),
        json!({"isbn": "2", "title": "The Lock Artist", "author": "Steve Hamilton"}),
        json!({"isbn": "3", "title": "HTML5", "author": "Remy Sharp"}),
        json!({"isbn": "4", "title": "Right Ho Jeeves", "author": "P.D. Woodhouse"}),
    ]);
    let options = SearchOptions {
        keys: vec!["title".to_string(), "author".to_string()],
        id: Some("isbn".to_string()),
        ..SearchOptions::default()
    };
    let engine = SearchEngine::new(&books, options);

    let ranked = engine.search("remy").unwrap();
    assert_eq!(ranked[0].item, Item::Id(&json!("3")));
    assert_eq!(ranked[0].score, 0.0);
}

#[test]
fn test_engine_scores_agree_with_matcher() {
    let texts = ["apple", "apply", "ample", "maple", "grape"];
    let entries = Entries::from(texts.to_vec());
    let engine = SearchEngine::new(&entries, SearchOptions::default());
    let matcher = PatternMatcher::new("apple", MatchOptions::default()).unwrap();

    let ranked = engine.search("apple").unwrap();
    for r in &ranked {
        let direct = matcher.search(texts[r.index]);
        assert!(direct.is_match);
        assert_eq!(direct.score, r.score);
    }
    assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    assert_eq!(ranked[0].item, Item::Text("apple"));
}
