//! Agent listing and commission commands.

use super::{CommandResult, require_session};
use crate::App;

/// Public agent listing, used at checkout to tag a sale for commission.
pub async fn agents(app: &App) -> CommandResult {
    let agents = app.users.agents().await?;
    if agents.is_empty() {
        println!("no active agents");
        return Ok(());
    }
    for agent in &agents {
        println!("{:<28} {} <{}>", agent.id, agent.name, agent.email);
    }
    Ok(())
}

/// The signed-in agent's commissions.
pub async fn commissions(app: &App) -> CommandResult {
    require_session(app, "/agent/dashboard").await?;

    let commissions = app.commissions.my_commissions().await?;
    if commissions.is_empty() {
        println!("no commissions yet");
        return Ok(());
    }
    for commission in &commissions {
        println!(
            "{:<28} order {:<28} {:>10}  {:?}",
            commission.id,
            commission.order_id,
            commission.amount.to_string(),
            commission.status
        );
    }
    Ok(())
}
