use proptest::prelude::*;
use std::{cell::RefCell, rc::Rc};
use taskboard_core::{
    dom::{DomHandle, MemoryDom},
    BoardConfig, ItemId, ItemStatus, ListView, ProjectStore, WorkItem,
};

#[derive(Debug, Clone)]
enum Op {
    Add(String, u32),
    Move(usize, ItemStatus),
    MoveUnknown(ItemStatus),
}

fn arb_status() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![Just(ItemStatus::Active), Just(ItemStatus::Finished)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        ("[a-z]{1,8}", 1u32..=5).prop_map(|(title, people)| Op::Add(title, people)),
        (any::<usize>(), arb_status()).prop_map(|(index, status)| Op::Move(index, status)),
        arb_status().prop_map(Op::MoveUnknown),
    ]
}

fn apply(store: &ProjectStore, ids: &mut Vec<ItemId>, op: &Op) {
    match op {
        Op::Add(title, people) => ids.push(store.add(title, "generated item", *people)),
        Op::Move(index, status) if !ids.is_empty() => {
            store.move_item(&ids[index % ids.len()], *status);
        }
        Op::Move(..) => {}
        Op::MoveUnknown(status) => store.move_item(&ItemId::from("not-an-item"), *status),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn adds_are_counted_and_active(titles in prop::collection::vec("[a-z]{1,8}", 0..20)) {
        let store = ProjectStore::new();
        for title in &titles {
            store.add(title, "generated item", 1);
        }

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.len(), titles.len());
        prop_assert!(snapshot.iter().all(|item| item.status() == ItemStatus::Active));
        let stored: Vec<&str> = snapshot.iter().map(WorkItem::title).collect();
        prop_assert_eq!(stored, titles.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn move_touches_only_target_status(
        count in 1usize..10,
        pick in any::<usize>(),
        status in arb_status(),
    ) {
        let store = ProjectStore::new();
        let ids: Vec<ItemId> = (0..count)
            .map(|n| store.add(&format!("item {n}"), "generated item", 2))
            .collect();
        let target = &ids[pick % count];
        let before = store.snapshot();

        store.move_item(target, status);

        for (old, new) in before.iter().zip(store.snapshot()) {
            if old.id() == target {
                prop_assert_eq!(new.status(), status);
                prop_assert_eq!(new.title(), old.title());
                prop_assert_eq!(new.description(), old.description());
                prop_assert_eq!(new.people(), old.people());
                prop_assert_eq!(new.created_at(), old.created_at());
            } else {
                prop_assert_eq!(&new, old);
            }
        }
    }

    #[test]
    fn unknown_move_is_silent(count in 0usize..5, status in arb_status()) {
        let store = ProjectStore::new();
        for n in 0..count {
            store.add(&format!("item {n}"), "generated item", 1);
        }
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.add_listener(move |_| *counter.borrow_mut() += 1);
        let before = store.snapshot();

        store.move_item(&ItemId::from("missing"), status);

        prop_assert_eq!(store.snapshot(), before);
        prop_assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn lists_mirror_latest_snapshot(ops in prop::collection::vec(arb_op(), 0..30)) {
        let memory = Rc::new(RefCell::new(MemoryDom::with_board_templates()));
        let dom: DomHandle = memory.clone();
        let store = ProjectStore::new();
        let config = BoardConfig::default();
        let active = ListView::new(&dom, &store, &config, ItemStatus::Active).unwrap();
        let finished = ListView::new(&dom, &store, &config, ItemStatus::Finished).unwrap();

        let mut ids = Vec::new();
        for op in &ops {
            apply(&store, &mut ids, op);

            for list in [&active, &finished] {
                let expected: Vec<ItemId> = store
                    .snapshot()
                    .into_iter()
                    .filter(|item| item.status() == list.category())
                    .map(|item| item.id().clone())
                    .collect();
                prop_assert_eq!(list.rendered_ids(), expected);
            }
        }
    }

    #[test]
    fn listeners_get_independent_snapshots(count in 1usize..6) {
        let store = ProjectStore::new();
        store.add_listener(|mut items: Vec<WorkItem>| items.truncate(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.add_listener(move |items| sink.borrow_mut().push(items.len()));

        for n in 0..count {
            store.add(&format!("item {n}"), "generated item", 1);
        }

        prop_assert_eq!(seen.borrow().clone(), (1..=count).collect::<Vec<_>>());
        prop_assert_eq!(store.len(), count);
    }
}
