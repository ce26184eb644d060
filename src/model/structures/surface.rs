use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};
use strum_macros::EnumIter;

/// The closed set of playing surfaces tracked with their own rating.
/// Match records carrying any other surface label are dropped by the model.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Surface {
    Hard,
    Clay,
    Grass
}

impl TryFrom<&str> for Surface {
    type Error = ();

    fn try_from(v: &str) -> Result<Self, Self::Error> {
        match v {
            "Hard" => Ok(Surface::Hard),
            "Clay" => Ok(Surface::Clay),
            "Grass" => Ok(Surface::Grass),
            _ => Err(())
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Hard => write!(f, "Hard"),
            Surface::Clay => write!(f, "Clay"),
            Surface::Grass => write!(f, "Grass")
        }
    }
}
