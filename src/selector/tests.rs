// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use rstest::rstest;

use super::{SearchStatus, Selector, SelectorError};
use crate::config::SelectorConfig;
use crate::load::{
    Completion, FetchError, FetchPage, FetchQuery, MemorySource, NodeSource, ParentScope,
};
use crate::model::fixtures::{abc_records, ids, named, nid, org_records};
use crate::model::LoadState;
use crate::query::KeywordMatcher;

type TestSelector = Selector<()>;

fn source() -> MemorySource<()> {
    MemorySource::new(org_records())
}

fn visible(selector: &TestSelector) -> Vec<String> {
    selector
        .render()
        .rows
        .iter()
        .filter(|row| !row.is_detached())
        .map(|row| row.id().to_string())
        .collect()
}

/// Answers keyword queries with the name matches only, leaving their ancestors out.
struct HitsOnly {
    inner: MemorySource<()>,
}

#[async_trait]
impl NodeSource<()> for HitsOnly {
    async fn fetch_nodes(&self, query: FetchQuery) -> Result<FetchPage<()>, FetchError> {
        let matcher = query.keyword.as_deref().and_then(KeywordMatcher::new);
        let mut page = self.inner.fetch_nodes(query).await?;
        if let Some(matcher) = matcher {
            page.entries.retain(|record| matcher.is_match(record.name()));
        }
        Ok(page)
    }
}

fn cascading() -> SelectorConfig {
    SelectorConfig { include_descendants: true, ..SelectorConfig::default() }
}

#[test]
fn cascade_select_and_deselect_on_abc() {
    let mut selector = TestSelector::new(cascading()).with_records(abc_records());
    assert_eq!(selector.select(&nid("a")), 3);
    assert_eq!(selector.selection().as_slice(), ids(&["a", "b", "c"]).as_slice());
    assert_eq!(selector.deselect(&nid("a")), 3);
    assert!(selector.selection().is_empty());
}

#[test]
fn toggle_and_include_descendants_switch() {
    let mut selector = TestSelector::default().with_records(abc_records());
    assert!(selector.toggle(&nid("a")));
    assert_eq!(selector.selection().as_slice(), ids(&["a"]).as_slice());
    assert!(!selector.toggle(&nid("a")));

    selector.toggle_include_descendants(true);
    assert!(selector.include_descendants());
    assert!(selector.toggle(&nid("a")));
    assert_eq!(selector.selection().len(), 3);

    selector.clear();
    assert!(selector.selection().is_empty());
}

#[tokio::test]
async fn lazy_expand_loads_children_and_opens_the_node() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.roots_state(), LoadState::Loaded);
    assert_eq!(visible(&selector), vec!["org", "labs"]);

    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.load_state(&nid("org")), LoadState::Loaded);
    assert_eq!(visible(&selector), vec!["org", "eng", "sales", "hr", "labs"]);

    // Loaded children are not fetched again.
    selector.collapse(&nid("org")).expect("collapse");
    assert_eq!(visible(&selector), vec!["org", "labs"]);
    let calls = source.calls();
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(source.calls(), calls);
    assert_eq!(visible(&selector), vec!["org", "eng", "sales", "hr", "labs"]);
}

#[tokio::test]
async fn failed_expand_is_local_and_retryable() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("eng")).await, Ok(Completion::Applied));

    source.fail_next(ParentScope::Node(nid("sales")));
    let err = selector.expand(&source, &nid("sales")).await.unwrap_err();
    assert!(matches!(err, SelectorError::Fetch(FetchError::Unavailable { .. })));
    assert_eq!(selector.load_state(&nid("sales")), LoadState::Failed);

    let sales = crate::ops::find_item_deep(selector.tree(), &nid("sales")).expect("sales");
    assert!(sales.collapsed());
    assert_eq!(sales.load_state(), LoadState::Failed);
    assert_eq!(visible(&selector), vec!["org", "eng", "platform", "apps", "sales", "hr", "labs"]);

    assert_eq!(selector.expand(&source, &nid("sales")).await, Ok(Completion::Applied));
    assert_eq!(selector.load_state(&nid("sales")), LoadState::Loaded);
    assert_eq!(
        visible(&selector),
        vec!["org", "eng", "platform", "apps", "sales", "emea", "apac", "hr", "labs"]
    );
}

#[tokio::test]
async fn out_of_order_completions_both_land() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));

    let org = selector.begin_expand(&nid("org")).expect("org").expect("org request");
    let labs = selector.begin_expand(&nid("labs")).expect("labs").expect("labs request");
    assert_eq!(selector.load_state(&nid("org")), LoadState::Loading);

    // A second expand while loading does not start another fetch.
    assert!(selector.begin_expand(&nid("org")).expect("org").is_none());

    let org_page = source.fetch_nodes(org.query.clone()).await;
    let labs_page = source.fetch_nodes(labs.query.clone()).await;
    assert_eq!(selector.complete_load(&labs.ticket, labs_page), Ok(Completion::Applied));
    assert_eq!(selector.complete_load(&org.ticket, org_page.clone()), Ok(Completion::Applied));
    assert_eq!(visible(&selector), vec!["org", "eng", "sales", "hr", "labs", "ml"]);

    // The same ticket cannot settle twice.
    assert_eq!(selector.complete_load(&org.ticket, org_page), Ok(Completion::Stale));
}

#[tokio::test]
async fn children_fetched_before_parents_attach_later() {
    let source = source();
    let mut selector = TestSelector::default()
        .with_records(vec![named("infra", "Infrastructure", "org/eng/platform/infra")]);
    assert!(visible(&selector).is_empty());

    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("eng")).await, Ok(Completion::Applied));
    let calls = source.calls();

    // `platform` already has `infra`, so opening it needs no fetch.
    assert_eq!(selector.expand(&source, &nid("platform")).await, Ok(Completion::Applied));
    assert_eq!(source.calls(), calls);
    assert_eq!(
        visible(&selector),
        vec!["org", "eng", "platform", "infra", "apps", "sales", "hr", "labs"]
    );
}

#[tokio::test]
async fn rebuild_keeps_collapse_state_of_known_nodes() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("labs")).await, Ok(Completion::Applied));
    selector.collapse(&nid("labs")).expect("collapse labs");

    assert_eq!(selector.expand(&source, &nid("sales")).await, Ok(Completion::Applied));
    assert_eq!(visible(&selector), vec!["org", "eng", "sales", "emea", "apac", "hr", "labs"]);
}

#[test]
fn duplicate_ids_keep_the_latest_record() {
    let mut selector = TestSelector::default()
        .with_records(vec![named("a", "Old", "a")])
        .with_selection(ids(&["a"]));
    let ticket = selector.begin_load_roots().ticket;
    let page = FetchPage::new(vec![named("a", "New", "a")]);
    assert_eq!(selector.complete_load(&ticket, Ok(page)), Ok(Completion::Applied));

    assert_eq!(selector.records().len(), 1);
    let render = selector.render();
    assert_eq!(render.rows.len(), 1);
    assert_eq!(render.tokens[0].label, "New");
}

#[test]
fn unknown_ids_are_reported() {
    let mut selector = TestSelector::default().with_records(abc_records());
    assert_eq!(selector.collapse(&nid("zz")), Err(SelectorError::UnknownNode(nid("zz"))));
    assert_eq!(
        selector.begin_expand(&nid("zz")).map(|request| request.is_some()),
        Err(SelectorError::UnknownNode(nid("zz")))
    );
}

#[test]
fn local_search_expands_loaded_paths() {
    let mut selector = TestSelector::default().with_records(org_records());
    assert!(selector.search_local("infrastructure"));
    assert!(selector.has_search_match());
    assert_eq!(
        visible(&selector),
        vec!["org", "eng", "platform", "infra", "apps", "sales", "hr", "labs"]
    );

    assert!(!selector.search_local("zzz"));
    assert!(!selector.has_search_match());
    assert_eq!(
        selector.search_status(),
        &SearchStatus::Ready { keyword: "zzz".to_owned(), has_match: false }
    );

    assert!(!selector.search_local("  "));
    assert_eq!(selector.search_status(), &SearchStatus::Idle);
}

#[tokio::test]
async fn remote_search_shows_batch_and_keeps_labels_for_detached_tokens() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));

    assert_eq!(selector.search(&source, "apac").await, Completion::Applied);
    assert!(selector.is_search_view());
    assert!(selector.has_search_match());
    assert_eq!(visible(&selector), vec!["org", "sales", "apac"]);

    selector.select(&nid("apac"));
    assert_eq!(selector.search(&source, "").await, Completion::Applied);
    assert!(!selector.is_search_view());
    assert_eq!(selector.search_status(), &SearchStatus::Idle);

    // `apac` is not loaded in the main tree, so it renders detached with its real name.
    let render = selector.render();
    let detached = render.detached().collect::<Vec<_>>();
    assert_eq!(detached.len(), 1);
    assert_eq!(detached[0].id, nid("apac"));
    assert_eq!(detached[0].label, "APAC Sales");
    assert_eq!(render.rows.last().map(|row| row.id().as_str()), Some("apac"));
}

#[tokio::test]
async fn stale_search_result_is_ignored() {
    let source = source();
    let mut selector = TestSelector::default();

    let older = selector.begin_search("sales").expect("older");
    let newer = selector.begin_search("machine").expect("newer");
    let pending = SearchStatus::Pending { keyword: "machine".to_owned() };
    assert_eq!(selector.search_status(), &pending);

    let newer_page = source.fetch_nodes(newer.query.clone()).await;
    let older_page = source.fetch_nodes(older.query.clone()).await;
    assert_eq!(selector.complete_search(&newer.ticket, newer_page), Completion::Applied);
    assert_eq!(selector.complete_search(&older.ticket, older_page), Completion::Stale);

    assert_eq!(visible(&selector), vec!["labs", "ml"]);
    assert_eq!(
        selector.search_status(),
        &SearchStatus::Ready { keyword: "machine".to_owned(), has_match: true }
    );
}

#[tokio::test]
async fn search_failure_differs_from_zero_results() {
    let source = source();
    let mut selector = TestSelector::default();

    assert_eq!(selector.search(&source, "nothing here").await, Completion::Applied);
    assert_eq!(
        selector.search_status(),
        &SearchStatus::Ready { keyword: "nothing here".to_owned(), has_match: false }
    );

    source.fail_next(ParentScope::Any);
    assert_eq!(selector.search(&source, "sales").await, Completion::Applied);
    match selector.search_status() {
        SearchStatus::Failed { keyword, error } => {
            assert_eq!(keyword, "sales");
            assert!(matches!(error, FetchError::Unavailable { .. }));
        }
        other => panic!("expected failed search, got {other:?}"),
    }
    assert!(!selector.has_search_match());
    assert!(!selector.is_search_view());
}

#[tokio::test]
async fn search_limit_comes_from_config() {
    let source = source();
    let config = SelectorConfig { search_limit: Some(1), ..SelectorConfig::default() };
    let mut selector = TestSelector::new(config);
    let request = selector.begin_search("sales").expect("request");
    assert_eq!(request.query.limit, Some(1));

    let page = source.fetch_nodes(request.query.clone()).await;
    assert_eq!(selector.complete_search(&request.ticket, page), Completion::Applied);
    assert_eq!(visible(&selector), vec!["org", "sales"]);
}

#[tokio::test]
async fn collapse_and_expand_all_act_on_loaded_nodes() {
    let source = source();
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("sales")).await, Ok(Completion::Applied));

    selector.collapse_all();
    assert_eq!(visible(&selector), vec!["org", "labs"]);

    let calls = source.calls();
    selector.expand_all();
    assert_eq!(source.calls(), calls);
    assert_eq!(visible(&selector), vec!["org", "eng", "sales", "emea", "apac", "hr", "labs"]);
}

#[tokio::test]
async fn search_hits_with_unknown_ancestors_are_shown_at_top_level() {
    let source = HitsOnly { inner: source() };
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));

    assert_eq!(selector.search(&source, "infra").await, Completion::Applied);
    assert_eq!(
        selector.search_status(),
        &SearchStatus::Ready { keyword: "infra".to_owned(), has_match: true }
    );
    assert!(selector.has_search_match());
    assert_eq!(visible(&selector), vec!["infra"]);

    selector.select(&nid("infra"));
    assert_eq!(selector.render().tokens[0].label, "Infrastructure");
    assert!(!selector.render().tokens[0].detached);
}

#[tokio::test]
async fn search_hits_hang_below_the_deepest_known_ancestor_chain() {
    let source = HitsOnly { inner: source() };
    let mut selector = TestSelector::default();
    assert_eq!(selector.load_roots(&source).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("org")).await, Ok(Completion::Applied));
    assert_eq!(selector.expand(&source, &nid("eng")).await, Ok(Completion::Applied));

    // `platform` is known now, so the whole path to `infra` is available.
    assert_eq!(selector.search(&source, "infra").await, Completion::Applied);
    assert_eq!(visible(&selector), vec!["org", "eng", "platform", "infra"]);

    // `emea` sits under `sales`, which is known but was never expanded.
    assert_eq!(selector.search(&source, "emea").await, Completion::Applied);
    assert_eq!(visible(&selector), vec!["org", "sales", "emea"]);
}

#[rstest]
#[case::collapsed(true, &["org", "eng"])]
#[case::open(false, &["org", "eng", "platform"])]
fn search_view_follows_collapsed_by_default(#[case] collapsed: bool, #[case] expected: &[&str]) {
    let config = SelectorConfig { collapsed_by_default: collapsed, ..SelectorConfig::default() };
    let mut selector = TestSelector::new(config).with_records(org_records());

    // `platform` does not match, so `eng` keeps whatever collapse flag it was built with.
    let request = selector.begin_search("engineering").expect("request");
    let page = FetchPage::new(vec![
        named("eng", "Engineering", "org/eng"),
        named("platform", "Platform", "org/eng/platform"),
    ]);
    assert_eq!(selector.complete_search(&request.ticket, Ok(page)), Completion::Applied);
    assert!(selector.has_search_match());
    assert_eq!(visible(&selector), expected);
}
