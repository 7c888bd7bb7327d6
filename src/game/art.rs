//! Block art rendered with [`Terminal::print_art`](crate::terminal::Terminal::print_art).
//!
//! Each block starts with a newline so it renders with a leading blank row.

pub const FRAME_TOP: &str =
    "╔══════════════════════════════════════════════════════════╗";
pub const FRAME_BOTTOM: &str =
    "╚══════════════════════════════════════════════════════════╝";

pub const CLOCK_MIDNIGHT: &str = r"
          .   *   .   *   .
       *       _______       *
    .       .-'  XII  '-.       .
       *   /  XI   |   I \   *
    .     |  X     |    II |     .
       *  | IX     o    III|  *
    .     |  VIII       IV |     .
       *   \  VII     V   /   *
    .       '-.   VI   .-'       .
       *       '-----'       *
    .   *   .   *   .   *   .   *";

pub const LADY_BLACK: &str = r"
           .   *   .   *   .
        *      _.-----._      *
     .       .'  .---.  '.       .
            /   ( o o )   \
        *  |     \ ^ /     |  *
     .     |   .--'-'--.   |     .
            \ /  |   |  \ /
        *    |   |   |   |    *
     .      /    |   |    \      .
           /  .--'   '--.  \
        * /  /           \  \ *
         |  |   .     .   |  |
     .   |__|   |     |   |__|   .
            |   |     |   |
        *   |___|     |___|   *
     .   *    .    *    .    *   .";

pub const WIN_BANNER: &str = r"
    *    .    *    .    *    .    *    .    *
  .                                           .
      *   SHE SMILES... AND FADES AWAY    *
  .                                           .
    *    .    *    .    *    .    *    .    *";

pub const LOSE_BANNER: &str = r"
  . * . * . * . * . * . * . * . * . * . * . *
  *                                           *
  .   HER LAUGHTER ECHOES AS THE DAWN RISES   .
  *                                           *
  . * . * . * . * . * . * . * . * . * . * . *";
