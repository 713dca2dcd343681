use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use ledger::{
    ChangeKind, Collection, Ledger, LedgerError, NewGoalCmd, NewTransactionCmd,
    NewWishlistItemCmd, OwnerContext, Priority, TransactionKind, TransactionListFilter,
    UpdateGoalCmd, UpdateTransactionCmd, UpdateWishlistItemCmd,
};
use migration::MigratorTrait;

async fn ledger_with_db() -> Ledger {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::builder().database(db).build().await.unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn create_and_list_transactions_newest_first() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "Gaji bulanan",
            TransactionKind::Income,
            5_000_000,
            "Gaji",
            date(2026, 1, 1),
        ))
        .await
        .unwrap();
    ledger
        .create_transaction(
            NewTransactionCmd::new(
                alice.clone(),
                "Belanja mingguan",
                TransactionKind::Expense,
                350_000,
                "Belanja",
                date(2026, 1, 10),
            )
            .notes("pasar"),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "Bonus",
            TransactionKind::Income,
            1_000_000,
            "Bonus",
            date(2026, 1, 5),
        ))
        .await
        .unwrap();

    let txs = ledger
        .list_transactions(&alice, 10, &TransactionListFilter::default())
        .await
        .unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].title, "Belanja mingguan");
    assert_eq!(txs[0].notes.as_deref(), Some("pasar"));
    assert_eq!(txs[1].title, "Bonus");
    assert_eq!(txs[2].title, "Gaji bulanan");
}

#[tokio::test]
async fn list_transactions_filters_by_kind_and_range() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    for (title, kind, day) in [
        ("Gaji", TransactionKind::Income, 1),
        ("Makan siang", TransactionKind::Expense, 2),
        ("Bonus", TransactionKind::Income, 20),
    ] {
        ledger
            .create_transaction(NewTransactionCmd::new(
                alice.clone(),
                title,
                kind,
                100_000,
                "Lainnya",
                date(2026, 2, day),
            ))
            .await
            .unwrap();
    }

    let filter = TransactionListFilter {
        kinds: Some(vec![TransactionKind::Income]),
        ..Default::default()
    };
    let incomes = ledger.list_transactions(&alice, 10, &filter).await.unwrap();
    assert_eq!(incomes.len(), 2);
    assert!(incomes.iter().all(|tx| tx.kind == TransactionKind::Income));

    let filter = TransactionListFilter {
        from: Some(date(2026, 2, 1)),
        to: Some(date(2026, 2, 10)),
        kinds: None,
    };
    let early = ledger.list_transactions(&alice, 10, &filter).await.unwrap();
    assert_eq!(early.len(), 2);
}

#[tokio::test]
async fn list_transactions_page_walks_without_overlap() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    for day in 1..=5 {
        ledger
            .create_transaction(NewTransactionCmd::new(
                alice.clone(),
                format!("entry {day}"),
                TransactionKind::Expense,
                10_000,
                "Makanan",
                date(2026, 3, day),
            ))
            .await
            .unwrap();
    }

    let filter = TransactionListFilter::default();
    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let (page, next) = ledger
            .list_transactions_page(&alice, 2, cursor.as_deref(), &filter)
            .await
            .unwrap();
        assert!(page.len() <= 2);
        seen.extend(page.into_iter().map(|tx| tx.id));
        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(seen.len(), 5);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn validation_fails_closed_before_any_write() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    let err = ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "   ",
            TransactionKind::Expense,
            10_000,
            "Makanan",
            date(2026, 1, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "title", .. }));

    let err = ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "Makan",
            TransactionKind::Expense,
            -1,
            "Makanan",
            date(2026, 1, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "amount", .. }));

    let err = ledger
        .create_goal(NewGoalCmd::new(alice.clone(), "Dana Darurat", 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "target_amount",
            ..
        }
    ));

    let txs = ledger
        .list_transactions(&alice, 10, &TransactionListFilter::default())
        .await
        .unwrap();
    assert!(txs.is_empty());
    assert!(ledger.list_goals(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn owner_scoping_hides_other_owners_rows() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");
    let bob = OwnerContext::signed_in("bob");

    let tx = ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "Gaji",
            TransactionKind::Income,
            1_000_000,
            "Gaji",
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    assert!(
        ledger
            .list_transactions(&bob, 10, &TransactionListFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        ledger.transaction(&bob, tx.id).await.unwrap_err(),
        LedgerError::NotFound("transaction".to_string())
    );
    assert_eq!(
        ledger
            .update_transaction(UpdateTransactionCmd::new(bob.clone(), tx.id).amount_minor(1))
            .await
            .unwrap_err(),
        LedgerError::NotFound("transaction".to_string())
    );
    assert_eq!(
        ledger.delete_transaction(&bob, tx.id).await.unwrap_err(),
        LedgerError::NotFound("transaction".to_string())
    );

    // Alice still sees the untouched row.
    let stored = ledger.transaction(&alice, tx.id).await.unwrap();
    assert_eq!(stored.amount_minor, 1_000_000);
}

#[tokio::test]
async fn missing_login_is_unauthorized() {
    assert_eq!(
        OwnerContext::from_login(None).unwrap_err(),
        LedgerError::Unauthorized
    );
    assert_eq!(
        OwnerContext::from_login(Some("   ")).unwrap_err(),
        LedgerError::Unauthorized
    );
    assert_eq!(
        OwnerContext::from_login(Some("alice")).unwrap().owner_id(),
        "alice"
    );
}

#[tokio::test]
async fn mutations_publish_events_in_operation_order() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");
    let mut events = ledger.notifier().subscribe();

    let tx = ledger
        .create_transaction(NewTransactionCmd::new(
            alice.clone(),
            "Makan siang",
            TransactionKind::Expense,
            45_000,
            "Makanan",
            date(2026, 1, 2),
        ))
        .await
        .unwrap();
    ledger
        .update_transaction(UpdateTransactionCmd::new(alice.clone(), tx.id).amount_minor(50_000))
        .await
        .unwrap();
    ledger.delete_transaction(&alice, tx.id).await.unwrap();

    for expected_kind in [ChangeKind::Insert, ChangeKind::Update, ChangeKind::Delete] {
        let event = events.try_recv().unwrap();
        assert_eq!(event.collection, Collection::Transactions);
        assert_eq!(event.kind, expected_kind);
        assert_eq!(event.affected_id, tx.id);
    }
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn goal_direct_edit_can_exceed_target() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    let goal = ledger
        .create_goal(
            NewGoalCmd::new(alice.clone(), "Dana Darurat", 1_000_000).deadline(date(2026, 12, 31)),
        )
        .await
        .unwrap();
    assert_eq!(goal.current_amount_minor, 0);
    assert_eq!(goal.deadline, Some(date(2026, 12, 31)));

    let updated = ledger
        .update_goal(UpdateGoalCmd::new(alice.clone(), goal.id).current_amount_minor(1_500_000))
        .await
        .unwrap();
    assert_eq!(updated.current_amount_minor, 1_500_000);
    // Storage is not clamped; display is.
    assert_eq!(updated.progress_percent(), 100);

    let err = ledger
        .update_goal(UpdateGoalCmd::new(alice.clone(), goal.id).current_amount_minor(-1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "current_amount",
            ..
        }
    ));

    ledger.delete_goal(&alice, goal.id).await.unwrap();
    assert_eq!(
        ledger.goal(&alice, goal.id).await.unwrap_err(),
        LedgerError::NotFound("savings goal".to_string())
    );
}

#[tokio::test]
async fn wishlist_lists_most_urgent_first() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    for (title, priority) in [
        ("Meja kerja", Priority::Low),
        ("Laptop baru", Priority::High),
        ("Kursi kantor", Priority::Medium),
    ] {
        ledger
            .create_wishlist_item(NewWishlistItemCmd::new(
                alice.clone(),
                title,
                2_000_000,
                priority,
            ))
            .await
            .unwrap();
    }

    let items = ledger.list_wishlist_items(&alice).await.unwrap();
    let priorities: Vec<Priority> = items.iter().map(|item| item.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);

    let laptop = items
        .iter()
        .find(|item| item.title == "Laptop baru")
        .unwrap();
    let updated = ledger
        .update_wishlist_item(
            UpdateWishlistItemCmd::new(alice.clone(), laptop.id).priority(Priority::Low),
        )
        .await
        .unwrap();
    assert_eq!(updated.priority, Priority::Low);
}

#[tokio::test]
async fn update_of_unknown_entity_is_not_found() {
    let ledger = ledger_with_db().await;
    let alice = OwnerContext::signed_in("alice");

    assert_eq!(
        ledger
            .update_transaction(
                UpdateTransactionCmd::new(alice.clone(), Uuid::new_v4()).amount_minor(1)
            )
            .await
            .unwrap_err(),
        LedgerError::NotFound("transaction".to_string())
    );
    assert_eq!(
        ledger
            .update_goal(UpdateGoalCmd::new(alice.clone(), Uuid::new_v4()).current_amount_minor(1))
            .await
            .unwrap_err(),
        LedgerError::NotFound("savings goal".to_string())
    );
    assert_eq!(
        ledger
            .update_wishlist_item(
                UpdateWishlistItemCmd::new(alice.clone(), Uuid::new_v4()).saved_amount_minor(1)
            )
            .await
            .unwrap_err(),
        LedgerError::NotFound("wishlist item".to_string())
    );
}
