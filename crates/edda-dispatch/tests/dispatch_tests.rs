//! Dispatch semantics integration tests
//!
//! Covers the observable dispatch contract:
//! - Sequential ordering and shared-payload mutation
//! - Concurrent join-all with serialized handler bodies
//! - Error propagation in both modes
//! - Unknown-channel and deleted-channel no-ops

use edda_dispatch::Dispatcher;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct Article {
    name: String,
    tags: Vec<String>,
}

#[test]
fn test_sequential_handlers_run_in_registration_order() {
    let dispatcher = Dispatcher::sequential();

    dispatcher.listen("before_save", |payload| {
        let article = payload.downcast_mut::<Article>().unwrap();
        article.tags.push("first".to_string());
        Ok(())
    });
    dispatcher.listen("before_save", |payload| {
        let article = payload.downcast_mut::<Article>().unwrap();
        article.tags.push("second".to_string());
        Ok(())
    });
    dispatcher.listen("before_save", |payload| {
        let article = payload.downcast_mut::<Article>().unwrap();
        article.tags.push("third".to_string());
        Ok(())
    });

    let mut article = Article {
        name: "draft".to_string(),
        tags: Vec::new(),
    };
    dispatcher.call("before_save", &mut article).unwrap();

    assert_eq!(article.tags, vec!["first", "second", "third"]);
}

#[test]
fn test_sequential_mutations_visible_to_later_handlers() {
    let dispatcher = Dispatcher::sequential();

    dispatcher.listen("rename", |payload| {
        let article = payload.downcast_mut::<Article>().unwrap();
        article.name = "A".to_string();
        Ok(())
    });
    dispatcher.listen("rename", |payload| {
        let article = payload.downcast_mut::<Article>().unwrap();
        // Earlier handler's write must already be visible here
        assert_eq!(article.name, "A");
        article.name = "B".to_string();
        Ok(())
    });

    let mut article = Article {
        name: "draft".to_string(),
        tags: Vec::new(),
    };
    dispatcher.call("rename", &mut article).unwrap();

    assert_eq!(article.name, "B");
}

#[test]
fn test_sequential_error_aborts_remaining_handlers() {
    let dispatcher = Dispatcher::sequential();
    let executed = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&executed);
    dispatcher.listen("validate", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    dispatcher.listen("validate", |_| {
        Err(edda_core::Error::missing_field("article", "body"))
    });
    let counter = Arc::clone(&executed);
    dispatcher.listen("validate", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let mut payload = ();
    let err = dispatcher.call("validate", &mut payload).unwrap_err();

    assert!(matches!(err, edda_core::Error::HandlerFailed { .. }));
    assert!(err.to_string().contains("validate"));
    // Only the handler before the failing one ran
    assert_eq!(executed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_joins_all_handlers_no_lost_updates() {
    let dispatcher = Dispatcher::concurrent();

    for _ in 0..3 {
        dispatcher.listen("counter", |payload| {
            let counter = payload.downcast_mut::<u64>().unwrap();
            // Non-atomic read-modify-write; the dispatcher's internal lock
            // must prevent lost updates
            let current = *counter;
            std::thread::yield_now();
            *counter = current + 1;
            Ok(())
        });
    }

    let mut counter = 0u64;
    dispatcher.call("counter", &mut counter).unwrap();

    assert_eq!(counter, 3);
}

#[test]
fn test_concurrent_many_handlers_all_complete_before_return() {
    let dispatcher = Dispatcher::concurrent();
    const LISTENERS: usize = 16;

    for _ in 0..LISTENERS {
        dispatcher.listen("burst", |payload| {
            let counter = payload.downcast_mut::<u64>().unwrap();
            *counter += 1;
            Ok(())
        });
    }

    let mut counter = 0u64;
    dispatcher.call("burst", &mut counter).unwrap();

    // call() returning proves the join: every increment is already applied
    assert_eq!(counter as usize, LISTENERS);
}

#[test]
fn test_concurrent_first_error_propagates_after_all_ran() {
    let dispatcher = Dispatcher::concurrent();
    let executed = Arc::new(AtomicUsize::new(0));

    for index in 0..4 {
        let counter = Arc::clone(&executed);
        dispatcher.listen("risky", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            if index == 1 {
                Err(edda_core::Error::missing_field("payload", "body"))
            } else {
                Ok(())
            }
        });
    }

    let mut payload = ();
    let err = dispatcher.call("risky", &mut payload).unwrap_err();

    assert!(matches!(err, edda_core::Error::HandlerFailed { .. }));
    // Unlike sequential mode, every handler still ran
    assert_eq!(executed.load(Ordering::SeqCst), 4);
}

#[test]
fn test_unknown_channel_call_has_no_side_effect() {
    let dispatcher = Dispatcher::concurrent();

    let mut payload = 41u64;
    dispatcher.call("never_registered", &mut payload).unwrap();

    assert_eq!(payload, 41);
}

#[test]
fn test_deleted_channel_becomes_noop() {
    let dispatcher = Dispatcher::sequential();

    dispatcher.listen("teardown", |payload| {
        *payload.downcast_mut::<u64>().unwrap() += 1;
        Ok(())
    });

    let mut payload = 0u64;
    dispatcher.call("teardown", &mut payload).unwrap();
    assert_eq!(payload, 1);

    dispatcher.delete(&["teardown"]);
    dispatcher.call("teardown", &mut payload).unwrap();
    assert_eq!(payload, 1);
}

#[test]
fn test_listeners_added_after_delete_start_fresh() {
    let dispatcher = Dispatcher::sequential();

    dispatcher.listen("cycle", |_| Ok(()));
    dispatcher.listen("cycle", |_| Ok(()));
    dispatcher.delete(&["cycle"]);

    dispatcher.listen("cycle", |_| Ok(()));
    assert_eq!(dispatcher.channel_len("cycle"), 1);
}
