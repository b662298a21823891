use shelfnote_core::{
    import_str, ClassificationFilter, Item, ItemStore, MemoryStorage, NewItem, ShelfStatus,
    StoreConfig, ViewFilter,
};

fn course_tasks() -> ItemStore<MemoryStorage> {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::course_tasks());
    import_str(
        &mut store,
        r#"[
            {"id": 1, "name": "Math HW", "course": "Calculus", "done": false},
            {"id": 2, "name": "Essay", "course": "History", "done": true}
        ]"#,
    )
    .unwrap();
    store
}

fn shelf() -> ItemStore<MemoryStorage> {
    ItemStore::open(MemoryStorage::new(), StoreConfig::bookshelf())
}

fn ids<'a>(items: &[&'a Item]) -> Vec<&'a str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

#[test]
fn pending_filter_with_empty_query_scenario() {
    let store = course_tasks();
    let filter = ViewFilter::new("", ClassificationFilter::Pending);

    let visible = filter.apply(store.items());
    assert_eq!(ids(&visible), vec!["1"]);
    assert_eq!(visible[0].primary_text, "Math HW");
}

#[test]
fn completed_filter_selects_done_items() {
    let store = course_tasks();
    let filter = ViewFilter::new("", "done".parse().unwrap());
    assert_eq!(ids(&filter.apply(store.items())), vec!["2"]);
}

#[test]
fn blank_query_and_all_returns_everything_in_order() {
    let store = shelf();
    for query in ["", "   "] {
        let visible = ViewFilter::new(query, ClassificationFilter::All).apply(store.items());
        let expected: Vec<&Item> = store.items().iter().collect();
        assert_eq!(visible, expected);
    }
}

#[test]
fn query_is_case_insensitive_over_primary_and_secondary_text() {
    let store = shelf();

    let by_title = ViewFilter::new("ATOMIC", ClassificationFilter::All).apply(store.items());
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].primary_text, "Atomic Habits");

    let by_author = ViewFilter::new("orwell", ClassificationFilter::All).apply(store.items());
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].primary_text, "1984");

    let none = ViewFilter::new("tolkien", ClassificationFilter::All).apply(store.items());
    assert!(none.is_empty());
}

#[test]
fn query_does_not_search_auxiliary_text() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::course_tasks());
    store
        .create(NewItem::new("Lab").secondary("Physics").auxiliary("bring calculator"))
        .unwrap();

    let visible = ViewFilter::new("calculator", ClassificationFilter::All).apply(store.items());
    assert!(visible.is_empty());
}

#[test]
fn status_and_query_combine() {
    let store = shelf();
    let reading = ViewFilter::new("", ClassificationFilter::Status(ShelfStatus::Reading))
        .apply(store.items());
    assert_eq!(reading.len(), 1);
    assert_eq!(reading[0].primary_text, "Atomic Habits");

    let mismatch = ViewFilter::new("1984", ClassificationFilter::Status(ShelfStatus::ToBuy))
        .apply(store.items());
    assert!(mismatch.is_empty());
}

#[test]
fn filter_is_idempotent_and_order_preserving() {
    let store = shelf();
    let filter = ViewFilter::new("o", ClassificationFilter::All);

    let once = filter.apply(store.items());
    let twice = filter.apply(once.iter().copied());
    assert_eq!(once, twice);

    let positions: Vec<usize> = once
        .iter()
        .map(|item| {
            store
                .items()
                .iter()
                .position(|candidate| candidate.id == item.id)
                .unwrap()
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn matches_agrees_with_apply() {
    let store = course_tasks();
    let filter = ViewFilter::new("his", ClassificationFilter::All);
    let visible = filter.apply(store.items());
    for item in store.items() {
        assert_eq!(filter.matches(item), visible.contains(&item));
    }
}

#[test]
fn empty_collection_yields_empty_view() {
    let store = ItemStore::open(MemoryStorage::new(), StoreConfig::dashboard_tasks());
    assert!(ViewFilter::all().apply(store.items()).is_empty());
}
