use chrono::NaiveDate;
use sea_orm::Database;

use engine::{CategoryKind, Engine, NewTransaction, Period, TransactionKind};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

async fn expense(engine: &Engine, description: &str, amount_minor: i64, on: NaiveDate, category: Uuid) {
    engine
        .create_transaction(NewTransaction {
            description: description.to_string(),
            amount_minor,
            date: on,
            kind: TransactionKind::Expense,
            category_id: Some(category),
            note: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn rollup_combines_category_and_subcategories() {
    let engine = engine_with_db().await;

    let groceries = engine
        .create_category("Groceries", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    let snacks = engine
        .create_category("Snacks", Some(groceries.id), None)
        .await
        .unwrap();

    let march = Period::new(3, 2024).unwrap();
    engine
        .upsert_budget(groceries.id, 500_00, march)
        .await
        .unwrap();
    engine.upsert_budget(snacks.id, 50_00, march).await.unwrap();

    expense(&engine, "Weekly shop", 300_00, date(2024, 3, 5), groceries.id).await;
    expense(&engine, "Crisps", 20_00, date(2024, 3, 10), snacks.id).await;

    let rows = engine
        .budget_overview(march, CategoryKind::Expense)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.name, "Groceries");
    assert_eq!(row.budgeted_minor, 550_00);
    assert_eq!(row.actual_minor, 320_00);
    assert_eq!(row.difference_minor, -230_00);

    assert_eq!(row.subcategories.len(), 1);
    let sub = &row.subcategories[0];
    assert_eq!(sub.name, "Snacks");
    assert_eq!(sub.budgeted_minor, 50_00);
    assert_eq!(sub.actual_minor, 20_00);
    assert_eq!(sub.difference_minor, -30_00);
}

#[tokio::test]
async fn period_without_data_yields_zero_rows() {
    let engine = engine_with_db().await;

    let rent = engine
        .create_category("Rent", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    // Data in another period must not leak in.
    engine
        .upsert_budget(rent.id, 1_200_00, Period::new(3, 2024).unwrap())
        .await
        .unwrap();
    expense(&engine, "March rent", 1_200_00, date(2024, 3, 1), rent.id).await;

    let rows = engine
        .budget_overview(Period::new(1, 2030).unwrap(), CategoryKind::Expense)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].budgeted_minor, 0);
    assert_eq!(rows[0].actual_minor, 0);
    assert_eq!(rows[0].difference_minor, 0);
    assert_eq!(rows[0].percentage, 0.0);
}

#[tokio::test]
async fn rollup_filters_by_kind_and_category() {
    let engine = engine_with_db().await;

    let salary = engine
        .create_category("Salary", None, Some(CategoryKind::Income))
        .await
        .unwrap();
    let food = engine
        .create_category("Food", None, Some(CategoryKind::Expense))
        .await
        .unwrap();

    let march = Period::new(3, 2024).unwrap();
    engine
        .create_transaction(NewTransaction {
            description: "Paycheck".to_string(),
            amount_minor: 2_000_00,
            date: date(2024, 3, 25),
            kind: TransactionKind::Income,
            category_id: Some(salary.id),
            note: None,
        })
        .await
        .unwrap();
    expense(&engine, "Dinner", 40_00, date(2024, 3, 12), food.id).await;
    // Uncategorized expense contributes to no category row.
    engine
        .create_transaction(NewTransaction {
            description: "Cash".to_string(),
            amount_minor: 10_00,
            date: date(2024, 3, 12),
            kind: TransactionKind::Expense,
            category_id: None,
            note: None,
        })
        .await
        .unwrap();

    let expense_rows = engine
        .budget_overview(march, CategoryKind::Expense)
        .await
        .unwrap();
    assert_eq!(expense_rows.len(), 1);
    assert_eq!(expense_rows[0].name, "Food");
    assert_eq!(expense_rows[0].actual_minor, 40_00);

    let income_rows = engine
        .budget_overview(march, CategoryKind::Income)
        .await
        .unwrap();
    assert_eq!(income_rows.len(), 1);
    assert_eq!(income_rows[0].name, "Salary");
    assert_eq!(income_rows[0].actual_minor, 2_000_00);
}

#[tokio::test]
async fn spending_percentage_follows_budget_policy() {
    let engine = engine_with_db().await;

    let fun = engine
        .create_category("Fun", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    let march = Period::new(3, 2024).unwrap();
    expense(&engine, "Cinema", 25_00, date(2024, 3, 9), fun.id).await;

    // No budget yet: percentage is 0, not an error or NaN.
    let rows = engine
        .category_spending(march, CategoryKind::Expense)
        .await
        .unwrap();
    assert_eq!(rows[0].percentage, 0.0);

    engine.upsert_budget(fun.id, 100_00, march).await.unwrap();
    let rows = engine
        .category_spending(march, CategoryKind::Expense)
        .await
        .unwrap();
    assert_eq!(rows[0].percentage, 25.0);
}

#[tokio::test]
async fn comparison_accumulates_and_truncates_to_today() {
    let engine = engine_with_db().await;

    let food = engine
        .create_category("Food", None, Some(CategoryKind::Expense))
        .await
        .unwrap();

    // Current month: days 1 and 3.
    expense(&engine, "Bread", 5_00, date(2024, 3, 1), food.id).await;
    expense(&engine, "Fruit", 10_00, date(2024, 3, 3), food.id).await;
    // Previous month: day 2 counts, day 20 is beyond the truncation point.
    expense(&engine, "Rice", 7_00, date(2024, 2, 2), food.id).await;
    expense(&engine, "Feast", 90_00, date(2024, 2, 20), food.id).await;

    engine
        .upsert_budget(food.id, 200_00, Period::new(3, 2024).unwrap())
        .await
        .unwrap();
    engine
        .upsert_budget(food.id, 150_00, Period::new(2, 2024).unwrap())
        .await
        .unwrap();

    let comparison = engine.spending_comparison(date(2024, 3, 5)).await.unwrap();

    assert_eq!(comparison.days, vec![1, 2, 3, 4, 5]);
    assert_eq!(comparison.current.month, 3);
    assert_eq!(comparison.previous.month, 2);
    assert_eq!(
        comparison.current.cumulative_minor,
        vec![5_00, 5_00, 15_00, 15_00, 15_00]
    );
    assert_eq!(
        comparison.previous.cumulative_minor,
        vec![0, 7_00, 7_00, 7_00, 7_00]
    );
    assert_eq!(comparison.current.budget_minor, 200_00);
    assert_eq!(comparison.previous.budget_minor, 150_00);

    // Cumulative curves never decrease.
    for spending in [&comparison.current, &comparison.previous] {
        for pair in spending.cumulative_minor.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}

#[tokio::test]
async fn comparison_on_first_of_month_has_one_point() {
    let engine = engine_with_db().await;

    let food = engine
        .create_category("Food", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    expense(&engine, "Coffee", 3_00, date(2024, 3, 1), food.id).await;

    let comparison = engine.spending_comparison(date(2024, 3, 1)).await.unwrap();
    assert_eq!(comparison.days, vec![1]);
    assert_eq!(comparison.current.cumulative_minor, vec![3_00]);
    assert_eq!(comparison.previous.cumulative_minor, vec![0]);
}

#[tokio::test]
async fn comparison_in_january_wraps_to_previous_december() {
    let engine = engine_with_db().await;

    let food = engine
        .create_category("Food", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    expense(&engine, "Leftovers", 12_00, date(2023, 12, 2), food.id).await;

    let comparison = engine.spending_comparison(date(2024, 1, 3)).await.unwrap();
    assert_eq!(comparison.previous.month, 12);
    assert_eq!(comparison.previous.year, 2023);
    assert_eq!(comparison.previous.cumulative_minor, vec![0, 12_00, 12_00]);
}

#[tokio::test]
async fn comparison_budget_sums_all_expense_budgets_flat() {
    let engine = engine_with_db().await;

    let food = engine
        .create_category("Food", None, Some(CategoryKind::Expense))
        .await
        .unwrap();
    let snacks = engine
        .create_category("Snacks", Some(food.id), None)
        .await
        .unwrap();
    let salary = engine
        .create_category("Salary", None, Some(CategoryKind::Income))
        .await
        .unwrap();

    let march = Period::new(3, 2024).unwrap();
    engine.upsert_budget(food.id, 100_00, march).await.unwrap();
    engine.upsert_budget(snacks.id, 30_00, march).await.unwrap();
    // Income budgets are not part of the expense comparison.
    engine
        .upsert_budget(salary.id, 999_00, march)
        .await
        .unwrap();

    let comparison = engine.spending_comparison(date(2024, 3, 4)).await.unwrap();
    assert_eq!(comparison.current.budget_minor, 130_00);
}
