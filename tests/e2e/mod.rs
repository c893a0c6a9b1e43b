// End-to-end tests for the Octocat relay
//
// Each test starts a fake GitHub API (axum on an ephemeral port) and the
// real application router pointed at it. Assertions inspect both the
// `{code, msg}` answer given to Solo and the calls GitHub received.

mod test_awesome;
mod test_health;
