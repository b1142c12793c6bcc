//! Keyboard controls.
//!
//! | Key | Action |
//! |-----|--------|
//! | `1`-`5` | Mood: default, happy, sad, angry, tired |
//! | Arrows | Look N / S / W / E |
//! | Keypad `1`-`9` | Look in the matching compass direction (`5` = center) |
//! | `Space` | Look straight ahead |
//! | `B` | Blink |
//! | `O` / `C` | Open / close both eyes |
//! | `F` / `L` | Confused / laugh gesture |
//! | `H` / `V` | Horizontal / vertical head shake |
//! | `Y` | Toggle cyclops |
//! | `U` | Toggle curiosity |
//! | `S` | Toggle sweat |
//! | `A` | Toggle auto blink |
//! | `I` | Toggle idle mode |
//! | `D` | Toggle debug overlay |
//!
//! Keys are matched on their SDL names so the mapping is plain data.

use roboeyes::{Axis, Mood, Position};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Mood(Mood),
    Look(Position),
    Blink,
    Open,
    Close,
    Confused,
    Laugh,
    Shake(Axis),
    ToggleCyclops,
    ToggleCuriosity,
    ToggleSweat,
    ToggleAutoBlink,
    ToggleIdle,
    ToggleOverlay,
}

/// Command bound to an SDL key name, if any.
pub fn command_for(key: &str) -> Option<Command> {
    let command = match key {
        "1" | "2" | "3" | "4" | "5" => {
            let index = key.as_bytes()[0] - b'1';
            Command::Mood(Mood::from_index(index))
        }
        "Up" | "Keypad 8" => Command::Look(Position::North),
        "Keypad 9" => Command::Look(Position::NorthEast),
        "Right" | "Keypad 6" => Command::Look(Position::East),
        "Keypad 3" => Command::Look(Position::SouthEast),
        "Down" | "Keypad 2" => Command::Look(Position::South),
        "Keypad 1" => Command::Look(Position::SouthWest),
        "Left" | "Keypad 4" => Command::Look(Position::West),
        "Keypad 7" => Command::Look(Position::NorthWest),
        "Space" | "Keypad 5" => Command::Look(Position::Default),
        "B" => Command::Blink,
        "O" => Command::Open,
        "C" => Command::Close,
        "F" => Command::Confused,
        "L" => Command::Laugh,
        "H" => Command::Shake(Axis::Horizontal),
        "V" => Command::Shake(Axis::Vertical),
        "Y" => Command::ToggleCyclops,
        "U" => Command::ToggleCuriosity,
        "S" => Command::ToggleSweat,
        "A" => Command::ToggleAutoBlink,
        "I" => Command::ToggleIdle,
        "D" => Command::ToggleOverlay,
        _ => return None,
    };
    Some(command)
}
