use std::{
    io::{self, BufRead, Write},
    time::Instant,
};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use gambit::{perft, splitperft, ChessError, Color, Game, Square};
use log::{error, warn};

/// A terminal stand-in for a graphical board.
///
/// The player picks pieces up with `select`, sees where they can go with `moves`, and drops
/// them with a move such as `e2e4`. Illegal moves are reported and ignored, the way a
/// piece dragged to a bad square snaps back.
#[derive(Debug, Default)]
pub struct Session {
    /// State of the game, including castling rights, piece placement, move history, etc.
    game: Game,
}

impl Session {
    /// Construct a new [`Session`] at the start of a game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the [`Game`] this session drives.
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Main entrypoint of the session.
    ///
    /// Reads commands from `stdin`, one per line, until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let name = env!("CARGO_PKG_NAME");
        let version = env!("CARGO_PKG_VERSION");
        println!("{name} {version}. Type `help` for a list of commands.");

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut buffer = String::with_capacity(256);

        loop {
            buffer.clear();
            let bytes = stdin
                .lock()
                .read_line(&mut buffer)
                .context("Failed to read line from stdin")?;

            // For ctrl + d
            if 0 == bytes {
                warn!("Received input of 0 bytes; quitting");
                return Ok(());
            }

            let buf = buffer.trim();
            if buf.is_empty() {
                continue;
            }

            let cmd = match parse_command(buf) {
                Ok(cmd) => cmd,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            };

            match self.execute(cmd, &mut stdout) {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(err) => {
                    error!("{err:#}");
                    return Err(err);
                }
            }
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    /// Runs a single command, writing its output to `out`.
    ///
    /// Returns `false` if the session should end.
    pub fn execute(&mut self, cmd: SessionCommand, out: &mut impl Write) -> Result<bool> {
        match cmd {
            SessionCommand::Help => self.help(out)?,
            SessionCommand::Show => self.show(out)?,
            SessionCommand::Moves(from) => self.moves(from, out)?,
            SessionCommand::Select(square) => self.select(square, out)?,
            SessionCommand::MakeMove(moves) => self.make_move(moves, out)?,
            SessionCommand::Check => self.check(out)?,
            SessionCommand::History => self.history(out)?,
            SessionCommand::Perft { depth, split } => self.perft(depth, split, out)?,
            SessionCommand::New => {
                self.game.reset();
                self.show(out)?;
            }
            SessionCommand::Exit => return Ok(false),
        }

        Ok(true)
    }

    fn help(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "available commands:")?;
        writeln!(out, "  show                 draw the board")?;
        writeln!(out, "  moves [square]       list moves, or highlight one piece's targets")?;
        writeln!(out, "  select <square>      pick up a piece of the side to move")?;
        writeln!(out, "  move <uci>...        make one or more moves, such as `move e2e4 e7e5`")?;
        writeln!(out, "  <uci>                shorthand for `move <uci>`")?;
        writeln!(out, "  check                report whether either King is attacked")?;
        writeln!(out, "  history              list the moves made so far")?;
        writeln!(out, "  perft <depth> [split] count leaf nodes of the move tree")?;
        writeln!(out, "  new                  start a new game")?;
        writeln!(out, "  exit | quit          leave")?;
        Ok(())
    }

    /// Draws the board with the selection and its targets highlighted.
    fn show(&self, out: &mut impl Write) -> Result<()> {
        let selected = self.game.selected();
        let targets = selected
            .map(|sq| self.game.destinations_from(sq))
            .unwrap_or_default();

        writeln!(out, "{}", self.render(selected, &targets))?;
        Ok(())
    }

    fn moves(&self, from: Option<Square>, out: &mut impl Write) -> Result<()> {
        if let Some(from) = from {
            let targets = self.game.destinations_from(from);
            writeln!(out, "{}", self.render(Some(from), &targets))?;
        } else {
            let mut moves = self
                .game
                .legal_moves()
                .iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>();
            moves.sort();
            writeln!(out, "{}", moves.join(" "))?;
        }
        Ok(())
    }

    fn select(&mut self, square: Square, out: &mut impl Write) -> Result<()> {
        if self.game.select(square) {
            self.show(out)
        } else {
            writeln!(
                out,
                "no {} piece on {square}",
                self.game.side_to_move().name()
            )?;
            Ok(())
        }
    }

    /// Applies each move in turn, stopping at the first illegal one.
    pub fn make_move<T: AsRef<str>>(
        &mut self,
        moves: impl IntoIterator<Item = T>,
        out: &mut impl Write,
    ) -> Result<()> {
        for uci in moves {
            let uci = uci.as_ref();
            let applied = self
                .game
                .parse_move(uci)
                .and_then(|mv| self.game.apply(mv));

            match applied {
                Ok(_) => {}
                Err(
                    err @ (ChessError::IllegalMove { .. }
                    | ChessError::InvalidMoveNotation { .. }
                    | ChessError::InvalidSquareNotation { .. }),
                ) => {
                    writeln!(out, "{err}")?;
                    break;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Failed to apply {uci:?}"));
                }
            }
        }

        self.show(out)
    }

    fn check(&self, out: &mut impl Write) -> Result<()> {
        for color in Color::iter() {
            let status = match self.game.king_square(color) {
                None => String::from("has no king"),
                Some(king) if self.game.in_check(color) => format!("is in check on {king}"),
                Some(king) => format!("is safe on {king}"),
            };
            writeln!(out, "{} king {status}", color.name())?;
        }
        Ok(())
    }

    fn history(&self, out: &mut impl Write) -> Result<()> {
        let moves = self
            .game
            .history()
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let pair = pair.iter().map(|m| m.to_string()).collect::<Vec<_>>();
                format!("{}. {}", i + 1, pair.join(" "))
            })
            .collect::<Vec<_>>();
        writeln!(out, "{}", moves.join(" "))?;
        Ok(())
    }

    fn perft(&self, depth: usize, split: bool, out: &mut impl Write) -> Result<()> {
        let now = Instant::now();

        let total = if split {
            let mut total = 0;
            for (mv, nodes) in splitperft(&self.game, depth)? {
                writeln!(out, "{:>8} {nodes:>width$}", mv.to_string(), width = depth * 2 + 1)?;
                total += nodes;
            }
            writeln!(out)?;
            total
        } else {
            perft(&self.game, depth)?
        };

        let elapsed = now.elapsed();
        writeln!(out, "Elapsed Time:          {elapsed:.1?}")?;
        writeln!(out, "Total Nodes:           {total}")?;
        Ok(())
    }

    /// Text rendering of the board, one rank per line.
    ///
    /// `selected` is drawn on a yellow background and each of `targets` on green. A King in
    /// check is drawn in red.
    fn render(&self, selected: Option<Square>, targets: &[Square]) -> String {
        self.game.position().render(|square, cell| {
            let text = cell.to_string();
            let in_check = cell
                .piece()
                .is_some_and(|p| p.is_king() && self.game.in_check(p.color()));

            let text = if selected == Some(square) {
                text.black().on_yellow()
            } else if targets.contains(&square) {
                text.black().on_green()
            } else if in_check {
                text.red().bold()
            } else {
                text.normal()
            };
            text.to_string()
        })
    }
}

/// A command the player can type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Help,

    Show,

    Moves(Option<Square>),

    Select(Square),

    MakeMove(Vec<String>),

    Check,

    History,

    Perft { depth: usize, split: bool },

    New,

    Exit,
}

/// Parses an input string and yields a [`SessionCommand`], if possible.
pub fn parse_command(input: &str) -> Result<SessionCommand> {
    let input = input.trim();
    let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));

    match cmd {
        "help" => Ok(SessionCommand::Help),
        "show" => Ok(SessionCommand::Show),
        "moves" => parse_moves_command(rest),
        "select" => parse_select_command(rest),
        "move" => parse_move_command(rest),
        "check" => Ok(SessionCommand::Check),
        "history" => Ok(SessionCommand::History),
        "perft" => parse_perft_command(rest),
        "new" => Ok(SessionCommand::New),
        "quit" | "exit" => Ok(SessionCommand::Exit),
        _ if rest.is_empty() && is_uci_move(cmd) => {
            Ok(SessionCommand::MakeMove(vec![cmd.to_string()]))
        }
        _ => bail!("Unknown command {input:?}. Type `help` for a list of commands."),
    }
}

/// Returns `true` if `text` is shaped like a UCI move: two squares and an optional `q`.
fn is_uci_move(text: &str) -> bool {
    let squares = text.get(0..2).zip(text.get(2..4));
    let promotion = text.get(4..);

    matches!(promotion, Some("" | "q" | "Q"))
        && squares.is_some_and(|(from, to)| {
            Square::from_uci(from).is_ok() && Square::from_uci(to).is_ok()
        })
}

fn parse_perft_command(rest: &str) -> Result<SessionCommand> {
    let mut args = rest.split_ascii_whitespace();

    let Some(depth) = args.next() else {
        bail!("usage: perft <depth> [split]");
    };

    let Ok(depth) = depth.parse::<usize>() else {
        bail!("usage: perft <depth> [split]");
    };

    let split = args.any(|arg| arg.eq_ignore_ascii_case("split"));

    Ok(SessionCommand::Perft { depth, split })
}

fn parse_move_command(rest: &str) -> Result<SessionCommand> {
    if rest.trim().is_empty() {
        bail!("usage: move <move1> [move2 move3 ...]");
    }

    let mut moves = vec![];

    for arg in rest.split_ascii_whitespace() {
        if is_uci_move(arg) {
            moves.push(arg.to_string());
        } else {
            bail!("Invalid move {arg:?}");
        }
    }

    Ok(SessionCommand::MakeMove(moves))
}

fn parse_moves_command(rest: &str) -> Result<SessionCommand> {
    let mut args = rest.split_ascii_whitespace();
    let from = if let Some(from) = args.next() {
        let Ok(from) = from.parse::<Square>() else {
            bail!("usage: moves [square]")
        };
        Some(from)
    } else {
        None
    };

    Ok(SessionCommand::Moves(from))
}

fn parse_select_command(rest: &str) -> Result<SessionCommand> {
    let square = rest
        .trim()
        .parse::<Square>()
        .context("usage: select <square>")?;
    Ok(SessionCommand::Select(square))
}
