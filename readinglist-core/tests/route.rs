use readinglist_core::classify::RouteTarget;
use readinglist_core::contract::{MockBookmarks, MockRepoStars, NewBookmark};
use readinglist_core::error::SinkError;
use readinglist_core::route::Router;

fn repo_target() -> RouteTarget {
    RouteTarget::Repo {
        owner: "ownerA".to_string(),
        repo: "repoB".to_string(),
    }
}

#[tokio::test]
async fn already_starred_repo_is_an_idempotent_no_op() {
    let mut stars = MockRepoStars::new();
    stars
        .expect_is_starred()
        .withf(|o, r| o == "ownerA" && r == "repoB")
        .times(2)
        .returning(|_, _| Ok(true));
    // The second route over the same target must issue zero additional
    // star mutations.
    stars.expect_star().times(0);
    let bookmarks = MockBookmarks::new();

    let router = Router::new(&stars, &bookmarks);
    assert!(router.route(&repo_target()).await.unwrap());
    assert!(router.route(&repo_target()).await.unwrap());
}

#[tokio::test]
async fn unstarred_repo_is_starred_once() {
    let mut stars = MockRepoStars::new();
    stars
        .expect_is_starred()
        .times(1)
        .returning(|_, _| Ok(false));
    stars
        .expect_star()
        .withf(|o, r| o == "ownerA" && r == "repoB")
        .times(1)
        .returning(|_, _| Ok(true));
    let bookmarks = MockBookmarks::new();

    let router = Router::new(&stars, &bookmarks);
    assert!(router.route(&repo_target()).await.unwrap());
}

#[tokio::test]
async fn sink_error_propagates_without_retry() {
    let mut stars = MockRepoStars::new();
    stars
        .expect_is_starred()
        .times(1)
        .returning(|_, _| Err(SinkError::Rejected("rate limited".to_string())));
    stars.expect_star().times(0);
    let bookmarks = MockBookmarks::new();

    let router = Router::new(&stars, &bookmarks);
    assert!(router.route(&repo_target()).await.is_err());
}

#[tokio::test]
async fn bookmark_title_is_transliterated_and_marked_unread() {
    let stars = MockRepoStars::new();
    let mut bookmarks = MockBookmarks::new();
    bookmarks
        .expect_create()
        .withf(|req: &NewBookmark<'_>| {
            req.url == "http://example.com/cafe"
                && req.title == "Cafe Melange"
                && req.mark_unread
        })
        .times(1)
        .returning(|_| Ok(true));

    let router = Router::new(&stars, &bookmarks);
    let target = RouteTarget::Bookmark {
        url: "http://example.com/cafe".to_string(),
        title: "Caf\u{e9} M\u{e9}lange".to_string(),
        tags: vec![],
    };
    assert!(router.route(&target).await.unwrap());
}

#[tokio::test]
async fn bookmark_tags_are_passed_through() {
    let stars = MockRepoStars::new();
    let mut bookmarks = MockBookmarks::new();
    bookmarks
        .expect_create()
        .withf(|req: &NewBookmark<'_>| req.tags == ["boardgames"])
        .times(1)
        .returning(|_| Ok(true));

    let router = Router::new(&stars, &bookmarks);
    let target = RouteTarget::Bookmark {
        url: "https://boardgamegeek.com/boardgame/36218".to_string(),
        title: "Dominion".to_string(),
        tags: vec!["boardgames".to_string()],
    };
    assert!(router.route(&target).await.unwrap());
}
