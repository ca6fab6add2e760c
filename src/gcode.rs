//! G-code instruction model and text rendering.
//!
//! One `Instruction` renders as one output line. Positions arrive here
//! already truncated to two decimal places, so the default f64 display
//! (shortest round-trip form) never prints more than two decimals.

use std::fmt;

/// Motion axis named in an emitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// One emitted line of output.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Linear move to an absolute position, optionally switching feed rate.
    Move {
        axis: Axis,
        pos: f64,
        feed: Option<u32>,
    },
    /// Free-text comment line.
    Comment(String),
}

impl Instruction {
    /// Shorthand for a move carrying a feed rate.
    pub fn feed_move(axis: Axis, pos: f64, feed: u32) -> Self {
        Instruction::Move {
            axis,
            pos,
            feed: Some(feed),
        }
    }

    /// Shorthand for a positioning move without a feed rate.
    pub fn position(axis: Axis, pos: f64) -> Self {
        Instruction::Move {
            axis,
            pos,
            feed: None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Move { axis, pos, feed } => {
                write!(f, "G01 {}{}", axis, pos)?;
                if let Some(feed) = feed {
                    write!(f, " F{}", feed)?;
                }
                Ok(())
            }
            Instruction::Comment(text) => write!(f, "( - {} - )", text),
        }
    }
}
