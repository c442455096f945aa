use crate::battle::commands::{BattleCommand, PlayerTarget};
use schema::StatChange;

/// One stage command per listed stat. Clamping at +/-6 and the "won't go
/// any higher" narration happen when the command executes.
pub(super) fn apply_stat_change_effect(
    changes: &[StatChange],
    target: PlayerTarget,
) -> Vec<BattleCommand> {
    changes
        .iter()
        .map(|change| BattleCommand::ChangeStatStage {
            target,
            stat: change.stat,
            delta: change.stages,
        })
        .collect()
}
