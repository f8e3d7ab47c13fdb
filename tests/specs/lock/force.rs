//! Force unlock specs
//!
//! Verify force releases only the holder and promotes the next waiter.

use crate::prelude::*;

#[test]
fn force_unlock_promotes_next_waiter() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "dev"]).passes();
    temp.lb("bob").args(&["lock", "dev"]).passes();
    temp.lb("carol").args(&["lock", "dev"]).passes();

    temp.lb("carol")
        .args(&["unlock", "dev", "force"])
        .passes()
        .stdout_has("[channel] <@carol> has force unlocked `dev` 🔓 which was locked by <@alice>")
        .stdout_has("<@bob> now holds `dev`");
    temp.lb("carol")
        .args(&["locks"])
        .passes()
        .stdout_has("`dev` is locked by <@bob>")
        .stdout_has("(1 waiting)");
}

#[test]
fn force_unlock_of_free_resource_is_private() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["unlock", "dev", "force"])
        .passes()
        .stdout_has("[you] `dev` is already unlocked 🔓");
}
