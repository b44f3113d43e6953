//! Database seeder for Livro Caixa development and testing.
//!
//! Seeds a demo profile, sample transactions (including a three-part
//! installment set), and suggestion patterns. The demo profile is stored
//! with a LEGACY password hash on purpose: logging in with it exercises the
//! transparent upgrade path end to end.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use caixa_core::auth::legacy_digest;
use caixa_core::entry::{EntryType, PaymentMethod};
use caixa_db::entities::sea_orm_active_enums::{
    EntryType as DbEntryType, PatternField,
};
use caixa_db::repositories::CreateTransactionInput;
use caixa_db::{PatternRepository, ProfileRepository, TransactionRepository};
use caixa_shared::TaxId;

/// Demo company CNPJ (a well-known check-digit-valid test number).
const DEMO_TAX_ID: &str = "11.222.333/0001-81";
/// Demo password; pairs with the legacy hash seeded below.
const DEMO_PASSWORD: &str = "caixa123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = caixa_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let tax_id = TaxId::parse(DEMO_TAX_ID).expect("demo tax-ID should be valid");

    println!("Seeding demo profile...");
    let profile_repo = ProfileRepository::new(db.clone());
    let profile = match profile_repo.find_by_tax_id(&tax_id).await {
        Ok(Some(existing)) => {
            println!("  Demo profile already exists, skipping...");
            existing
        }
        Ok(None) => {
            // Legacy hash on purpose; first login upgrades it to Argon2id.
            let legacy = legacy_digest(DEMO_PASSWORD, &tax_id);
            profile_repo
                .create(&tax_id, "Padaria Dois Irmaos", &legacy)
                .await
                .expect("Failed to create demo profile")
        }
        Err(e) => panic!("Failed to look up demo profile: {e}"),
    };
    println!("  login: {DEMO_TAX_ID}  password: {DEMO_PASSWORD}");

    println!("Seeding transactions...");
    seed_transactions(&db, profile.id).await;

    println!("Seeding patterns...");
    seed_patterns(&db, profile.id).await;

    println!("Seeding complete!");
}

async fn seed_transactions(db: &sea_orm::DatabaseConnection, profile_id: uuid::Uuid) {
    let repo = TransactionRepository::new(db.clone());
    let today = Utc::now().date_naive();
    let first_of_month = today.with_day(1).expect("day 1 always exists");

    let entries = [
        CreateTransactionInput {
            entry_type: EntryType::Income,
            description: "Vendas da semana".to_string(),
            amount: Decimal::new(185_000, 2),
            payment_method: PaymentMethod::LumpSum,
            installment_count: 1,
            due_date: first_of_month,
            category: "Vendas".to_string(),
        },
        CreateTransactionInput {
            entry_type: EntryType::Expense,
            description: "Aluguel do ponto".to_string(),
            amount: Decimal::new(120_000, 2),
            payment_method: PaymentMethod::LumpSum,
            installment_count: 1,
            due_date: first_of_month,
            category: "Aluguel".to_string(),
        },
        // Installment set: three monthly parts sharing the amount.
        CreateTransactionInput {
            entry_type: EntryType::Expense,
            description: "Forno industrial".to_string(),
            amount: Decimal::new(65_000, 2),
            payment_method: PaymentMethod::Installment,
            installment_count: 3,
            due_date: first_of_month,
            category: "Equipamentos".to_string(),
        },
    ];

    for input in entries {
        let description = input.description.clone();
        match repo.create(profile_id, input).await {
            Ok(rows) => println!("  {} ({} row(s))", description, rows.len()),
            Err(e) => println!("  Skipping '{description}': {e}"),
        }
    }
}

async fn seed_patterns(db: &sea_orm::DatabaseConnection, profile_id: uuid::Uuid) {
    let repo = PatternRepository::new(db.clone());

    let patterns = [
        (DbEntryType::Income, PatternField::Category, "Vendas"),
        (DbEntryType::Income, PatternField::Description, "Vendas da semana"),
        (DbEntryType::Expense, PatternField::Category, "Aluguel"),
        (DbEntryType::Expense, PatternField::Category, "Fornecedores"),
        (DbEntryType::Expense, PatternField::Description, "Compra de insumos"),
    ];

    for (entry_type, field, value) in patterns {
        match repo.create(profile_id, entry_type, field, value).await {
            Ok(_) => println!("  {value}"),
            Err(e) => println!("  Skipping '{value}': {e}"),
        }
    }
}
