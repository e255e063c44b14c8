use tracing::{error, info};

use crate::common::LedgerError;
use crate::domains::ledger::models::DecisionRecord;
use crate::kernel::ServerDeps;

/// Append one decision record to the ledger worksheet.
///
/// The ledger has no uniqueness constraint; exclusivity of decisions is
/// enforced before this is called.
pub async fn append(record: &DecisionRecord, deps: &ServerDeps) -> Result<(), LedgerError> {
    let worksheet = deps.settings.ledger_worksheet.as_str();

    if let Err(e) = deps.sheets.append_row(worksheet, record.to_row()).await {
        error!(
            worksheet,
            player = %record.player_name,
            quest = %record.quest_title,
            error = %e,
            "Failed to append decision record"
        );
        return Err(e.into());
    }

    info!(
        worksheet,
        player = %record.player_name,
        quest = %record.quest_title,
        decision = record.decision.as_str(),
        "Decision recorded"
    );
    Ok(())
}
