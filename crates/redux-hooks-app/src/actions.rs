/// Actions represent all possible changes to the profile state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    SetName(String),
    SetAge(u32),
    /// Not handled by the reducer; the state passes through untouched
    Unknown,
}
