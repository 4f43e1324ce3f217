use readinglist_core::tags::{TagIndex, TagRule};

fn boardgames_rule() -> TagRule {
    TagRule {
        tag: "boardgames".to_string(),
        subreddits: vec!["boardgames".to_string(), "dominion".to_string()],
        domains: vec!["boardgamegeek.com".to_string()],
    }
}

#[test]
fn subreddit_lookup_is_case_insensitive() {
    let index = TagIndex::build(&[boardgames_rule()]);

    assert_eq!(index.tags_for_subreddit("Dominion"), ["boardgames"]);
    assert_eq!(index.tags_for_subreddit("BOARDGAMES"), ["boardgames"]);
}

#[test]
fn domain_lookup_returns_mapped_tags() {
    let index = TagIndex::build(&[boardgames_rule()]);

    assert_eq!(index.tags_for_domain("boardgamegeek.com"), ["boardgames"]);
    assert_eq!(index.tags_for_domain("BoardGameGeek.com"), ["boardgames"]);
}

#[test]
fn unmapped_input_yields_empty_set() {
    let index = TagIndex::build(&[boardgames_rule()]);

    assert!(index.tags_for_domain("example.com").is_empty());
    assert!(index.tags_for_subreddit("7wonders").is_empty());
}

#[test]
fn tag_order_follows_rule_declaration_order() {
    let rules = vec![
        TagRule {
            tag: "rust".to_string(),
            subreddits: vec!["rust".to_string()],
            domains: vec![],
        },
        TagRule {
            tag: "programming".to_string(),
            subreddits: vec!["rust".to_string(), "programming".to_string()],
            domains: vec![],
        },
    ];
    let index = TagIndex::build(&rules);

    assert_eq!(index.tags_for_subreddit("rust"), ["rust", "programming"]);
    assert_eq!(index.tags_for_subreddit("programming"), ["programming"]);
}

#[test]
fn duplicate_tag_rules_union_their_memberships() {
    let rules = vec![
        TagRule {
            tag: "games".to_string(),
            subreddits: vec!["boardgames".to_string()],
            domains: vec![],
        },
        TagRule {
            tag: "games".to_string(),
            subreddits: vec!["boardgames".to_string(), "dominion".to_string()],
            domains: vec!["boardgamegeek.com".to_string()],
        },
    ];
    let index = TagIndex::build(&rules);

    // Repeated inversion must not duplicate the tag under the same key.
    assert_eq!(index.tags_for_subreddit("boardgames"), ["games"]);
    assert_eq!(index.tags_for_subreddit("dominion"), ["games"]);
    assert_eq!(index.tags_for_domain("boardgamegeek.com"), ["games"]);
}

#[test]
fn identical_configuration_yields_identical_lookups() {
    let rules = vec![
        boardgames_rule(),
        TagRule {
            tag: "news".to_string(),
            subreddits: vec![],
            domains: vec!["example.org".to_string()],
        },
    ];
    let a = TagIndex::build(&rules);
    let b = TagIndex::build(&rules);

    for key in ["boardgames", "dominion", "unknown"] {
        assert_eq!(a.tags_for_subreddit(key), b.tags_for_subreddit(key));
    }
    for key in ["boardgamegeek.com", "example.org", "unknown.example"] {
        assert_eq!(a.tags_for_domain(key), b.tags_for_domain(key));
    }
}
