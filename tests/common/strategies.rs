use proptest::prelude::*;

/// Strategy for generating group names
pub fn group_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.]{0,31}"
}

/// Strategy for generating handler names; duplicates are allowed
pub fn handler_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Strategy for generating a sequence of (group, handler) registrations drawn
/// from a small pool of group names so groups get reused
pub fn registrations_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(group_name_strategy(), 1..5).prop_flat_map(|groups| {
        prop::collection::vec(
            (prop::sample::select(groups), handler_name_strategy()),
            0..40,
        )
    })
}
