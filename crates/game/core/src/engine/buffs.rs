//! Buff ledger: applies and expires timed stat modifiers on the player.
//!
//! Deltas are folded into the player's totals on application and subtracted
//! verbatim on expiry, so totals only depend on the set of active buffs.

use super::Journal;
use crate::state::{BuffId, BuffTemplate, PlayerState};

pub fn apply_buff(player: &mut PlayerState, template: &BuffTemplate, id: BuffId) {
    let buff = template.instantiate(id);
    player.attack += buff.attack_delta();
    player.defense += buff.defense_delta();
    player.shift_max_health(buff.max_health_delta());
    player.buffs.push(buff);
}

/// Removes a buff and reverses its deltas. Returns `false` if it was not
/// active.
pub fn expire_buff(player: &mut PlayerState, id: BuffId) -> bool {
    let Some(index) = player.buffs.iter().position(|buff| buff.id == id) else {
        return false;
    };
    let buff = player.buffs.remove(index);
    player.attack -= buff.attack_delta();
    player.defense -= buff.defense_delta();
    player.shift_max_health(-buff.max_health_delta());
    true
}

/// Decrements every active buff once and expires those that run out.
pub fn tick_buffs(player: &mut PlayerState, journal: &mut Journal) {
    for buff in &mut player.buffs {
        buff.duration -= 1;
    }
    let expired: Vec<(BuffId, String)> = player
        .buffs
        .iter()
        .filter(|buff| buff.is_expired())
        .map(|buff| (buff.id, buff.name.clone()))
        .collect();
    for (id, name) in expired {
        expire_buff(player, id);
        journal.system(format!("{name} fades."));
    }
}
