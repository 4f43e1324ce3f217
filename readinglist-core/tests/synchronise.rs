use readinglist_core::classify::Classifier;
use readinglist_core::contract::{
    MockBookmarks, MockItemHandler, MockRepoStars, MockSavedItemSource, NewBookmark, Page,
    SavedItem,
};
use readinglist_core::drain::DrainOptions;
use readinglist_core::error::SourceFetchError;
use readinglist_core::route::Router;
use readinglist_core::synchronise::{synchronise, NamedSource, RouteHandler};
use readinglist_core::tags::{TagIndex, TagRule};

fn empty_after_first_page(items: Vec<SavedItem>) -> MockSavedItemSource {
    let mut source = MockSavedItemSource::new();
    let last_id = items.last().map(|i| i.source_id.clone());
    source
        .expect_fetch_page()
        .withf(|cursor| cursor.is_none())
        .returning(move |_| Ok(Page {
            items: items.clone(),
        }));
    source
        .expect_fetch_page()
        .withf(move |cursor| cursor.map(str::to_string) == last_id)
        .returning(|_| Ok(Page::default()));
    source
}

#[tokio::test]
async fn one_failing_source_does_not_block_the_next() {
    let mut broken = MockSavedItemSource::new();
    broken
        .expect_fetch_page()
        .returning(|_| Err(SourceFetchError::Protocol("auth expired".to_string())));

    let mut healthy = empty_after_first_page(vec![SavedItem {
        source_id: "42".to_string(),
        url: "http://example.com/article".to_string(),
        title: "Article".to_string(),
        tags: vec![],
    }]);
    healthy.expect_acknowledge().times(1).returning(|_| Ok(true));

    let mut handler = MockItemHandler::new();
    handler.expect_handle().times(1).returning(|_| true);

    let sources = [
        NamedSource {
            name: "reddit",
            source: &broken,
        },
        NamedSource {
            name: "ttrss",
            source: &healthy,
        },
    ];
    let report = synchronise(&sources, &handler, &DrainOptions::default()).await;

    assert_eq!(report.sources.len(), 2);
    assert!(report.sources[0].drain.is_err());
    let healthy_report = report.sources[1].drain.as_ref().unwrap();
    assert_eq!(healthy_report.acknowledged, 1);
    assert!(!report.all_failed());
}

#[tokio::test]
async fn all_failed_only_when_every_source_fails() {
    let mut broken_a = MockSavedItemSource::new();
    broken_a
        .expect_fetch_page()
        .returning(|_| Err(SourceFetchError::Protocol("down".to_string())));
    let mut broken_b = MockSavedItemSource::new();
    broken_b
        .expect_fetch_page()
        .returning(|_| Err(SourceFetchError::Protocol("down".to_string())));

    let handler = MockItemHandler::new();
    let sources = [
        NamedSource {
            name: "reddit",
            source: &broken_a,
        },
        NamedSource {
            name: "ttrss",
            source: &broken_b,
        },
    ];
    let report = synchronise(&sources, &handler, &DrainOptions::default()).await;
    assert!(report.all_failed());
}

#[tokio::test]
async fn route_handler_stars_repos_and_bookmarks_the_rest() {
    let index = TagIndex::build(&[TagRule {
        tag: "boardgames".to_string(),
        subreddits: vec!["boardgames".to_string()],
        domains: vec!["boardgamegeek.com".to_string()],
    }]);
    let classifier = Classifier::new("github.com");

    let mut stars = MockRepoStars::new();
    stars
        .expect_is_starred()
        .withf(|o, r| o == "rust-lang" && r == "rust")
        .times(1)
        .returning(|_, _| Ok(false));
    stars
        .expect_star()
        .times(1)
        .returning(|_, _| Ok(true));

    let mut bookmarks = MockBookmarks::new();
    bookmarks
        .expect_create()
        .withf(|req: &NewBookmark<'_>| {
            req.url == "https://boardgamegeek.com/boardgame/36218" && req.tags == ["boardgames"]
        })
        .times(1)
        .returning(|_| Ok(true));

    let handler = RouteHandler::new(&classifier, &index, Router::new(&stars, &bookmarks));

    let mut source = empty_after_first_page(vec![
        SavedItem {
            source_id: "t3_aaa".to_string(),
            url: "https://github.com/rust-lang/rust".to_string(),
            title: "The Rust language".to_string(),
            tags: vec![],
        },
        SavedItem {
            source_id: "t3_bbb".to_string(),
            url: "https://boardgamegeek.com/boardgame/36218".to_string(),
            title: "Dominion".to_string(),
            tags: vec![],
        },
    ]);
    source.expect_acknowledge().times(2).returning(|_| Ok(true));

    let sources = [NamedSource {
        name: "reddit",
        source: &source,
    }];
    let report = synchronise(&sources, &handler, &DrainOptions::default()).await;
    let drained = report.sources[0].drain.as_ref().unwrap();
    assert_eq!(drained.processed, 2);
    assert_eq!(drained.acknowledged, 2);
}

#[tokio::test]
async fn unclassifiable_item_is_skipped_not_fatal() {
    let index = TagIndex::build(&[]);
    let classifier = Classifier::new("github.com");
    let stars = MockRepoStars::new();
    let mut bookmarks = MockBookmarks::new();
    bookmarks.expect_create().times(1).returning(|_| Ok(true));

    let handler = RouteHandler::new(&classifier, &index, Router::new(&stars, &bookmarks));

    let mut source = empty_after_first_page(vec![
        SavedItem {
            source_id: "1".to_string(),
            url: "not a url".to_string(),
            title: "Broken".to_string(),
            tags: vec![],
        },
        SavedItem {
            source_id: "2".to_string(),
            url: "http://example.com/fine".to_string(),
            title: "Fine".to_string(),
            tags: vec![],
        },
    ]);
    // Only the routable item is acknowledged.
    source
        .expect_acknowledge()
        .withf(|id| id == "2")
        .times(1)
        .returning(|_| Ok(true));

    let sources = [NamedSource {
        name: "ttrss",
        source: &source,
    }];
    let report = synchronise(&sources, &handler, &DrainOptions::default()).await;
    let drained = report.sources[0].drain.as_ref().unwrap();
    assert_eq!(drained.processed, 2);
    assert_eq!(drained.acknowledged, 1);
    assert_eq!(drained.skipped, 1);
}
