use super::MatrixError;

/// Assembly state of a matrix
///
/// ```text
///  Unassembled --assemble--> Assembled --factor--> Factored
///       ^                        |                    |
///       +------- insert ---------+<--- unfactor ------+
/// ```
///
/// Inserting into a factored matrix is an error.  Its only way out
/// is [`on_unfactor`](AssemblyState::on_unfactor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyState {
    #[default]
    Unassembled,
    Assembled,
    Factored,
}

impl AssemblyState {
    pub fn on_insert(self) -> Result<Self, MatrixError> {
        match self {
            AssemblyState::Factored => Err(MatrixError::Factored),
            _ => Ok(AssemblyState::Unassembled),
        }
    }

    pub fn on_assemble(self) -> Result<Self, MatrixError> {
        match self {
            AssemblyState::Factored => Err(MatrixError::AlreadyFactored),
            _ => Ok(AssemblyState::Assembled),
        }
    }

    pub fn on_factor(self) -> Result<Self, MatrixError> {
        match self {
            AssemblyState::Unassembled => Err(MatrixError::NotAssembled),
            AssemblyState::Assembled => Ok(AssemblyState::Factored),
            AssemblyState::Factored => Err(MatrixError::AlreadyFactored),
        }
    }

    pub fn on_unfactor(self) -> Self {
        match self {
            AssemblyState::Factored => AssemblyState::Assembled,
            other => other,
        }
    }

    pub fn require_assembled(self) -> Result<(), MatrixError> {
        match self {
            AssemblyState::Assembled => Ok(()),
            AssemblyState::Unassembled => Err(MatrixError::NotAssembled),
            AssemblyState::Factored => Err(MatrixError::AlreadyFactored),
        }
    }
}

#[test]
fn test_assembly_transitions() {
    use AssemblyState::*;

    let s = AssemblyState::default();
    assert_eq!(s, Unassembled);
    assert_eq!(s.on_factor(), Err(MatrixError::NotAssembled));

    let s = s.on_assemble().unwrap();
    assert_eq!(s, Assembled);
    assert_eq!(s.on_insert(), Ok(Unassembled));

    let s = s.on_factor().unwrap();
    assert_eq!(s, Factored);
    assert_eq!(s.on_insert(), Err(MatrixError::Factored));
    assert_eq!(s.on_assemble(), Err(MatrixError::AlreadyFactored));
    assert_eq!(s.on_factor(), Err(MatrixError::AlreadyFactored));

    // the only way back
    assert_eq!(s.on_unfactor(), Assembled);
    assert_eq!(Unassembled.on_unfactor(), Unassembled);
}
