use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use axum_autoshop_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{labor, parts, vehicle_catalog},
};

const CATALOG: &[(&str, &str, &[i32])] = &[
    ("Chevrolet", "Silverado 1500", &[2018, 2019, 2020, 2021, 2022]),
    ("Chevrolet", "Malibu", &[2016, 2017, 2018, 2019]),
    ("Ford", "F-150", &[2017, 2018, 2019, 2020, 2021, 2022]),
    ("Ford", "Escape", &[2018, 2019, 2020, 2021]),
    ("Honda", "Civic", &[2016, 2017, 2018, 2019, 2020, 2021]),
    ("Honda", "CR-V", &[2017, 2018, 2019, 2020, 2021]),
    ("Toyota", "Camry", &[2015, 2016, 2017, 2018, 2019, 2020]),
    ("Toyota", "RAV4", &[2017, 2018, 2019, 2020, 2021, 2022]),
    ("Nissan", "Altima", &[2016, 2017, 2018, 2019]),
    ("Subaru", "Outback", &[2018, 2019, 2020, 2021]),
];

const PARTS: &[(&str, &str, &str, &str, i64, i64, i32)] = &[
    ("ACDelco", "Oil Filter", "PF63", "Filters", 450, 999, 24),
    ("ACDelco", "Engine Air Filter", "A3181C", "Filters", 850, 1899, 12),
    ("Bosch", "Wiper Blade 22\"", "22A", "Exterior", 620, 1499, 18),
    ("NGK", "Spark Plug", "ILTR6A8G", "Ignition", 710, 1599, 32),
    ("Wagner", "Front Brake Pads", "ZD1092", "Brakes", 2850, 5999, 8),
    ("Wagner", "Rear Brake Rotor", "BD126354E", "Brakes", 3450, 6999, 6),
    ("Gates", "Serpentine Belt", "K060841", "Engine", 1980, 3999, 5),
    ("Interstate", "Battery Group 24F", "MT-24F", "Electrical", 9200, 15999, 4),
];

const LABOR: &[(&str, i64, &str, &str, f64)] = &[
    ("Oil Change", 3500, "Maintenance", "Drain, replace filter, refill", 0.5),
    ("Tire Rotation", 2500, "Maintenance", "Rotate and torque all four wheels", 0.5),
    ("Front Brake Job", 15000, "Brakes", "Replace pads, inspect rotors", 1.5),
    ("Battery Replacement", 3000, "Electrical", "Remove, install, test charging", 0.25),
    ("Engine Diagnostic", 9500, "Diagnostics", "Scan, road test, written findings", 1.0),
    ("Coolant Flush", 8900, "Maintenance", "Drain, flush, refill with OEM coolant", 1.0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let existing = vehicle_catalog::Entity::find().count(&orm).await?;
    if existing > 0 {
        println!("Catalog already seeded ({existing} rows); nothing to do");
        return Ok(());
    }

    let mut catalog_rows = 0usize;
    for (make, model, years) in CATALOG {
        for year in *years {
            vehicle_catalog::ActiveModel {
                id: Set(Uuid::new_v4()),
                make: Set(make.to_string()),
                model: Set(model.to_string()),
                year: Set(*year),
            }
            .insert(&orm)
            .await?;
            catalog_rows += 1;
        }
    }

    for (brand, item_name, part_number, category, paid, charged, qty) in PARTS {
        parts::ActiveModel {
            id: Set(Uuid::new_v4()),
            brand: Set(brand.to_string()),
            item_name: Set(item_name.to_string()),
            part_number: Set(part_number.to_string()),
            category: Set(category.to_string()),
            description: Set(None),
            cost_cents: Set(None),
            cost_paid_cents: Set(Some(*paid)),
            cost_charged_cents: Set(Some(*charged)),
            in_stock: Set(None),
            quantity_on_hand: Set(*qty),
            created_at: Set(Utc::now().into()),
        }
        .insert(&orm)
        .await?;
    }

    for (name, cost_cents, category, description, hours) in LABOR {
        labor::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            cost_cents: Set(*cost_cents),
            category: Set(category.to_string()),
            description: Set(Some(description.to_string())),
            estimated_hours: Set(*hours),
            created_at: Set(Utc::now().into()),
        }
        .insert(&orm)
        .await?;
    }

    println!(
        "Seed completed: {catalog_rows} catalog rows, {} parts, {} labor entries",
        PARTS.len(),
        LABOR.len()
    );
    Ok(())
}
