use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, TransactionTrait,
};
use tracing::info;

use crate::entities::product;

//first run only, a store that already has products is left alone
pub async fn seed_products(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = product::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    //(name, description, price in cents, image)
    let catalog: [(&str, &str, i64, &str); 6] = [
        (
            "Ceramic Pour-Over Set",
            "Hand-glazed ceramic dripper with a matching carafe. Brews two cups.",
            3450,
            "/images/pour-over-set.jpg",
        ),
        (
            "Walnut Cutting Board",
            "End-grain walnut board, 40x30 cm, finished with food-safe mineral oil.",
            5200,
            "/images/walnut-board.jpg",
        ),
        (
            "Linen Apron",
            "Stonewashed linen apron with leather straps and a front pocket.",
            2890,
            "/images/linen-apron.jpg",
        ),
        (
            "Cast Iron Skillet",
            "Pre-seasoned 26 cm skillet. Oven safe, gets better with every use.",
            4100,
            "/images/cast-iron-skillet.jpg",
        ),
        (
            "Stoneware Mug",
            "350 ml speckled stoneware mug. Dishwasher and microwave safe.",
            1200,
            "/images/stoneware-mug.jpg",
        ),
        (
            "Olive Wood Spoon Set",
            "Three hand-carved olive wood spoons for cooking and serving.",
            1750,
            "/images/spoon-set.jpg",
        ),
    ];

    let now = Utc::now();
    let rows = catalog
        .into_iter()
        .enumerate()
        .map(|(i, (name, description, cents, image))| product::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            price: Set(Decimal::new(cents, 2)),
            image_url: Set(Some(image.to_string())),
            //stagger timestamps so newest-first ordering is stable
            created_at: Set(now - Duration::seconds(60 * i as i64)),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let txn = db.begin().await?;
    product::Entity::insert_many(rows).exec(&txn).await?;
    txn.commit().await?;

    info!("Seeded {} demo products", catalog.len());
    Ok(())
}
