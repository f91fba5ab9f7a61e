use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL")?;

    let db = Database::connect(database_url).await?;
    let backend = db.get_database_backend();

    for table in ["project_track", "seaql_migrations"] {
        let sql = match backend {
            DbBackend::Postgres => format!("DROP TABLE IF EXISTS \"{table}\" CASCADE;"),
            _ => format!("DROP TABLE IF EXISTS \"{table}\";"),
        };
        db.execute(Statement::from_string(backend, sql)).await?;
    }
    println!("Database reset successfully");
    Ok(())
}
