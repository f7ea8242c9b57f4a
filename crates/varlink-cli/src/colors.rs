//! Terminal color markers for rendered interface descriptions.

use varlink_idl::{MarkerPair, Palette};

const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const NORMAL: &str = "\x1b[0m";

/// The marker pairs used when stdout is a terminal.
pub(crate) const fn terminal_palette() -> Palette {
    Palette {
        keyword: MarkerPair::new(BLUE, NORMAL),
        type_name: MarkerPair::new(MAGENTA, NORMAL),
        member_name: MarkerPair::new(GREEN, NORMAL),
        builtin: MarkerPair::new(CYAN, NORMAL),
    }
}
