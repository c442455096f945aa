use std::fmt;

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    MoveData(MoveDataError),
    /// Error related to species data lookup or processing
    SpeciesData(SpeciesDataError),
    /// Error related to invalid battle state
    BattleState(BattleStateError),
    /// Error related to invalid player actions
    Action(ActionError),
    /// Error raised while building a creature or a team
    Team(TeamError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveDataError {
    /// The specified move was not found in the repository
    MoveNotFound(String),
    /// Move data is malformed or incomplete
    MalformedData(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesDataError {
    /// The specified species was not found in the repository
    SpeciesNotFound(String),
    /// Species data is malformed or incomplete
    MalformedData(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// Invalid player index
    InvalidPlayerIndex(usize),
    /// The battle already has a winner
    BattleCompleted,
    /// Battle state is in an inconsistent or corrupted state
    InconsistentState(String),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index is out of bounds
    InvalidMoveIndex(usize),
    /// Pokemon index is out of bounds
    InvalidPokemonIndex(usize),
    SwitchTargetFainted(usize),
    SwitchTargetAlreadyActive(usize),
    /// The chosen move has no PP left
    NoPpRemaining(String),
    /// A replacement was submitted for a side that does not need one
    NotAwaitingSwitch,
    /// A recharge was submitted for a Pokemon that has nothing to recharge
    NotRecharging,
    /// The side must send in a replacement before anything else
    ReplacementRequired,
}

/// Errors related to building creatures and teams
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    EmptyTeam,
    TeamTooLarge { size: usize, max: usize },
    TooManyMoves { count: usize, max: usize },
    InvalidLevel(u8),
    /// The species cannot have the requested ability
    InvalidAbility { species: String, ability: String },
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::MoveData(err) => write!(f, "Move data error: {}", err),
            BattleEngineError::SpeciesData(err) => write!(f, "Species data error: {}", err),
            BattleEngineError::BattleState(err) => write!(f, "Battle state error: {}", err),
            BattleEngineError::Action(err) => write!(f, "Action error: {}", err),
            BattleEngineError::Team(err) => write!(f, "Team error: {}", err),
        }
    }
}

impl fmt::Display for MoveDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDataError::MoveNotFound(name) => write!(f, "Move not found: {}", name),
            MoveDataError::MalformedData(details) => write!(f, "Malformed move data: {}", details),
        }
    }
}

impl fmt::Display for SpeciesDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesDataError::SpeciesNotFound(name) => write!(f, "Species not found: {}", name),
            SpeciesDataError::MalformedData(details) => {
                write!(f, "Malformed species data: {}", details)
            }
        }
    }
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::InvalidPlayerIndex(index) => {
                write!(f, "Invalid player index: {}", index)
            }
            BattleStateError::BattleCompleted => write!(f, "The battle is already over"),
            BattleStateError::InconsistentState(details) => {
                write!(f, "Inconsistent battle state: {}", details)
            }
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::InvalidPokemonIndex(index) => {
                write!(f, "Invalid Pokemon index: {}", index)
            }
            ActionError::SwitchTargetFainted(index) => {
                write!(f, "Pokemon at index {} has fainted", index)
            }
            ActionError::SwitchTargetAlreadyActive(index) => {
                write!(f, "Pokemon at index {} is already in battle", index)
            }
            ActionError::NoPpRemaining(name) => write!(f, "{} has no PP left", name),
            ActionError::NotAwaitingSwitch => write!(f, "No replacement is required"),
            ActionError::NotRecharging => {
                write!(f, "The active Pokemon does not need to recharge")
            }
            ActionError::ReplacementRequired => {
                write!(f, "A replacement Pokemon must be sent out first")
            }
        }
    }
}

impl fmt::Display for TeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamError::EmptyTeam => write!(f, "A team needs at least one Pokemon"),
            TeamError::TeamTooLarge { size, max } => {
                write!(f, "Team has {} Pokemon, the limit is {}", size, max)
            }
            TeamError::TooManyMoves { count, max } => {
                write!(f, "Pokemon knows {} moves, the limit is {}", count, max)
            }
            TeamError::InvalidLevel(level) => write!(f, "Invalid level: {}", level),
            TeamError::InvalidAbility { species, ability } => {
                write!(f, "{} cannot have the ability {}", species, ability)
            }
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for MoveDataError {}
impl std::error::Error for SpeciesDataError {}
impl std::error::Error for BattleStateError {}
impl std::error::Error for ActionError {}
impl std::error::Error for TeamError {}

impl From<MoveDataError> for BattleEngineError {
    fn from(err: MoveDataError) -> Self {
        BattleEngineError::MoveData(err)
    }
}

impl From<SpeciesDataError> for BattleEngineError {
    fn from(err: SpeciesDataError) -> Self {
        BattleEngineError::SpeciesData(err)
    }
}

impl From<BattleStateError> for BattleEngineError {
    fn from(err: BattleStateError) -> Self {
        BattleEngineError::BattleState(err)
    }
}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::Action(err)
    }
}

impl From<TeamError> for BattleEngineError {
    fn from(err: TeamError) -> Self {
        BattleEngineError::Team(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
