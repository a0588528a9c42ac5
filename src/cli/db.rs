use tokio::process::Command;

async fn sqlx_migrate(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("sqlx").arg("migrate").args(args).status().await?;
    if !status.success() {
        anyhow::bail!("sqlx migrate {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

pub async fn db_generate(migration_name: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["add", migration_name, "-r"]).await
}

pub async fn db_list(database_url: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["info", "-D", database_url]).await
}

pub async fn db_migrate(database_url: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["run", "-D", database_url]).await
}

pub async fn db_revert(database_url: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["revert", "-D", database_url]).await
}
