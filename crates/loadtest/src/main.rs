use goose::prelude::*;

async fn health_check(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/health").await?;
    Ok(())
}

async fn readiness_check(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/readiness").await?;
    Ok(())
}

async fn liveness_check(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/liveness").await?;
    Ok(())
}

async fn db_ping(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/db/ping").await?;
    Ok(())
}

async fn list_tenants(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/api/tenants").await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    // Probes run far more often than datastore calls in practice.
    GooseAttack::initialize()?
        .register_scenario(
            scenario!("Probes")
                .set_weight(8)?
                .register_transaction(transaction!(health_check))
                .register_transaction(transaction!(readiness_check))
                .register_transaction(transaction!(liveness_check)),
        )
        .register_scenario(
            scenario!("Datastore")
                .set_weight(2)?
                .register_transaction(transaction!(db_ping))
                .register_transaction(transaction!(list_tenants)),
        )
        .execute()
        .await?;

    Ok(())
}
