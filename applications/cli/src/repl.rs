//! Interactive player
//!
//! Reads one command per line, applies it to the session and prints the
//! resulting state. Generic over its input and output so it can be driven
//! from tests.

use crate::simulated::SimulatedAudio;
use podcastr_core::{convert_duration_to_time_string, EpisodeCatalog};
use podcastr_playback::{PlayerEvent, PlayerSession, SessionSnapshot};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Callbacks handled per command before giving up on a chatty element
const MAX_AUDIO_EVENTS: usize = 256;

const HELP: &str = "\
commands:
  play <n>     play episode n on its own (n must be listed)
  list <n>     play the whole list starting at episode n
               (past the end starts at the last episode)
  toggle       play / pause
  next, prev   move through the queue
  loop         toggle looping
  shuffle      toggle shuffling
  seek <s>     jump to second s
  tick [s]     let s seconds of audio play
  end          finish the current episode
  clear        stop and empty the queue
  status       show the player
  help         show this help
  quit         leave";

/// One REPL command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    List(usize),
    Toggle,
    Next,
    Prev,
    Loop,
    Shuffle,
    Seek(u64),
    Tick(Option<u64>),
    End,
    Clear,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs a number")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

fn number<T: FromStr>(name: &'static str, arg: Option<&str>) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "play" => Command::Play(number("play", arg)?),
            "list" => Command::List(number("list", arg)?),
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "loop" => Command::Loop,
            "shuffle" => Command::Shuffle,
            "seek" => Command::Seek(number("seek", arg)?),
            "tick" => Command::Tick(arg.map(|_| number("tick", arg)).transpose()?),
            "end" => Command::End,
            "clear" | "stop" => Command::Clear,
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

/// Terminal front end over a session and a simulated audio element
pub struct Repl {
    session: PlayerSession,
    audio: SimulatedAudio,
    catalog: EpisodeCatalog,
    tick_seconds: u64,
}

impl Repl {
    /// Wire a session to a fresh simulated element
    pub fn new(mut session: PlayerSession, catalog: EpisodeCatalog, tick_seconds: u64) -> Self {
        let audio = SimulatedAudio::new();
        session.set_audio_element(Box::new(audio.clone()));

        let mut repl = Self {
            session,
            audio,
            catalog,
            tick_seconds,
        };
        repl.pump_audio();
        repl
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn audio(&self) -> &SimulatedAudio {
        &self.audio
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        writeln!(output, "{} episodes loaded, 'help' for commands", self.catalog.len())?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, &mut output)?,
                Err(err) => writeln!(output, "error: {}", err)?,
            }
        }

        Ok(())
    }

    /// Apply one command and print the outcome
    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> std::io::Result<()> {
        debug!(?command, "execute");

        match command {
            Command::Play(index) => match self.catalog.episodes().get(index) {
                Some(episode) => self.session.play(episode.clone()),
                None => return self.no_such_episode(index, output),
            },
            Command::List(index) => {
                self.session
                    .play_list(self.catalog.episodes().to_vec(), index);
            }
            Command::Toggle => self.session.toggle_play(),
            Command::Next => {
                if !self.session.play_next() {
                    writeln!(output, "no next episode")?;
                }
            }
            Command::Prev => {
                if !self.session.play_previous() {
                    writeln!(output, "no previous episode")?;
                }
            }
            Command::Loop => self.session.toggle_loop(),
            Command::Shuffle => self.session.toggle_shuffle(),
            Command::Seek(position) => {
                if !self.session.seek(position) {
                    writeln!(output, "nothing to seek")?;
                }
            }
            Command::Tick(seconds) => {
                self.audio.tick(seconds.unwrap_or(self.tick_seconds));
            }
            Command::End => self.audio.finish(),
            Command::Clear => self.session.clear_player_state(),
            Command::Status => {}
            Command::Help => return writeln!(output, "{}", HELP),
            Command::Quit => return Ok(()),
        }

        self.pump_audio();
        self.report_events(output)?;
        writeln!(output, "{}", render_status(&self.session.snapshot()))
    }

    fn no_such_episode<W: Write>(&self, index: usize, output: &mut W) -> std::io::Result<()> {
        writeln!(
            output,
            "no episode {} (have {})",
            index,
            self.catalog.len()
        )
    }

    /// Feed queued element callbacks back into the session
    fn pump_audio(&mut self) {
        for _ in 0..MAX_AUDIO_EVENTS {
            let Some((ticket, event)) = self.audio.next_event() else {
                return;
            };
            self.session.handle_audio_event(ticket, event);
        }
    }

    fn report_events<W: Write>(&mut self, output: &mut W) -> std::io::Result<()> {
        for event in self.session.drain_events() {
            debug!(?event, "session event");
            match event {
                PlayerEvent::QueueExhausted => writeln!(output, "queue finished")?,
                PlayerEvent::AudioError { message } => writeln!(output, "audio error: {}", message)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// One-line player summary
pub fn render_status(snapshot: &SessionSnapshot) -> String {
    let Some(episode) = &snapshot.current_episode else {
        return "nothing playing".to_string();
    };

    let mut line = format!(
        "{} {}/{} [{}/{}] {}",
        if snapshot.is_playing { "playing" } else { "paused" },
        convert_duration_to_time_string(snapshot.display_elapsed()),
        episode.duration_as_string(),
        snapshot.current_index.map_or(0, |index| index + 1),
        snapshot.queue_len,
        episode.title,
    );

    if snapshot.is_looping {
        line.push_str(" [loop]");
    }
    if snapshot.is_shuffling {
        line.push_str(" [shuffle]");
    }
    line
}
