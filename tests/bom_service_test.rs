mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use stockmill_api::{errors::ServiceError, services::bom::BomService};

#[tokio::test]
async fn expansion_scales_per_batch_quantities() {
    let db = common::setup_test_db().await;

    let flour = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let sugar = common::seed_item(&db, "SUGAR-01", "Sugar").await;
    let cake = common::seed_item(&db, "CAKE-01", "Tea Cake").await;
    common::seed_recipe(
        &db,
        cake.id,
        dec!(5),
        &[(flour.id, dec!(3)), (sugar.id, dec!(1.5))],
    )
    .await;

    let service = BomService::new(db.clone());
    let lines = service
        .standard_consumptions(cake.id, 4)
        .await
        .expect("expansion should resolve");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].item_id, flour.id);
    assert_eq!(lines[0].standard_qty, dec!(12));
    assert_eq!(lines[1].item_id, sugar.id);
    assert_eq!(lines[1].standard_qty, dec!(6));
}

#[tokio::test]
async fn inactive_recipes_are_ignored() {
    let db = common::setup_test_db().await;

    let flour = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let cake = common::seed_item(&db, "CAKE-01", "Tea Cake").await;
    let recipe = common::seed_recipe(&db, cake.id, dec!(5), &[(flour.id, dec!(3))]).await;

    // Retire the only recipe.
    use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
    let mut active = recipe.into_active_model();
    active.is_active = Set(false);
    active
        .update(db.as_ref())
        .await
        .expect("recipe should deactivate");

    let service = BomService::new(db.clone());
    let result = service.standard_consumptions(cake.id, 1).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn missing_recipe_is_not_found() {
    let db = common::setup_test_db().await;
    let cake = common::seed_item(&db, "CAKE-01", "Tea Cake").await;

    let service = BomService::new(db.clone());
    let result = service.standard_consumptions(cake.id, 2).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn non_positive_batch_count_is_rejected() {
    let db = common::setup_test_db().await;

    let service = BomService::new(db.clone());
    for batch_count in [0, -3] {
        let result = service.standard_consumptions(1, batch_count).await;
        assert_matches!(result, Err(ServiceError::ValidationError(_)));
    }
}
