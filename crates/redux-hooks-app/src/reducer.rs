use std::rc::Rc;

use crate::actions::ProfileAction;
use crate::state::ProfileState;

/// Reducer - pure function that produces new state from current state + action
///
/// Unhandled actions return the very same state so identity-based selectors
/// see no change.
pub fn reduce(state: &Rc<ProfileState>, action: &ProfileAction) -> Rc<ProfileState> {
    match action {
        ProfileAction::SetName(name) => Rc::new(ProfileState {
            name: Rc::from(name.as_str()),
            ..(**state).clone()
        }),
        ProfileAction::SetAge(age) => Rc::new(ProfileState {
            age: *age,
            ..(**state).clone()
        }),
        ProfileAction::Unknown => Rc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_name_then_age() {
        let initial = Rc::new(ProfileState::default());

        let named = reduce(&initial, &ProfileAction::SetName("Ann".to_string()));
        let aged = reduce(&named, &ProfileAction::SetAge(30));

        assert_eq!(
            *aged,
            ProfileState {
                name: Rc::from("Ann"),
                age: 30
            }
        );
        // Untouched fields keep their identity
        assert!(Rc::ptr_eq(&named.name, &aged.name));
    }

    #[test]
    fn test_unknown_action_passes_state_through() {
        let initial = Rc::new(ProfileState::default());
        let next = reduce(&initial, &ProfileAction::Unknown);

        assert!(Rc::ptr_eq(&initial, &next));
    }
}
