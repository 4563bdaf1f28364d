// src/events/parse.rs
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::options::MalformedPolicy;
use crate::error::{Error, Result};
use crate::events::assembly::{Assembler, Dropped};
use crate::events::classify::{LineFault, classify};
use crate::game::Game;
use crate::players::{IdResolver, PlayerLookup};

/// Games read from one event file.
#[derive(Debug, Default)]
pub struct FileGames {
    pub games: Vec<Game>,
    /// Games left out under the `skip` policy.
    pub dropped: Vec<Dropped>,
}

pub fn parse_event_file<L: PlayerLookup>(
    path: &Path,
    resolver: &mut IdResolver<L>,
    policy: MalformedPolicy,
) -> Result<FileGames> {
    let file = File::open(path)?;
    parse_events(BufReader::new(file), path, resolver, policy)
}

/// Drive the assembler over every line of `reader`. `path` is only used for error messages.
/// Player names in event files are not always UTF-8; lines are decoded lossily.
pub fn parse_events<R: BufRead, L: PlayerLookup>(
    mut reader: R,
    path: &Path,
    resolver: &mut IdResolver<L>,
    policy: MalformedPolicy,
) -> Result<FileGames> {
    let mut asm = Assembler::new(policy);
    let mut games = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let text = String::from_utf8_lossy(&buf);
        let line = classify(&text).map_err(|LineFault(reason)| Error::MalformedLine {
            path: path.to_path_buf(),
            line: line_no,
            text: text.trim_end().to_string(),
            reason,
        })?;
        if let Some(game) = asm.feed(line, resolver)? {
            games.push(game);
        }
    }
    asm.finish()?;

    logd!("{}: {} lines, {} games", path.display(), line_no, games.len());
    Ok(FileGames { games, dropped: asm.take_dropped() })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;

    use super::*;

    struct OneLookup;
    impl PlayerLookup for OneLookup {
        fn reverse_lookup(&mut self, ids: &[String]) -> Result<HashMap<String, u32>> {
            Ok(ids.iter().enumerate().map(|(i, id)| (id.clone(), i as u32 + 1)).collect())
        }
    }

    #[test]
    fn bad_field_reports_file_and_line() {
        let log = "id,BAL200304010\ninfo,date,2003-04-01\n";
        let mut resolver = IdResolver::new(OneLookup);
        let err = parse_events(Cursor::new(log), Path::new("2003BAL.EVA"), &mut resolver, MalformedPolicy::Skip)
            .unwrap_err();
        match err {
            Error::MalformedLine { path, line, text, .. } => {
                assert_eq!(path, Path::new("2003BAL.EVA"));
                assert_eq!(line, 2);
                assert_eq!(text, "info,date,2003-04-01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_names_do_not_fail() {
        let mut log = b"id,BAL200304010\nstart,garcf001,\"Freddy Garc".to_vec();
        log.extend([0xED, b'a']); // latin-1 i-acute
        log.extend(b"\",0,0,1\n");
        let mut resolver = IdResolver::new(OneLookup);
        let out = parse_events(Cursor::new(log), Path::new("x"), &mut resolver, MalformedPolicy::Skip).unwrap();
        assert!(out.games.is_empty());
        assert_eq!(out.dropped.len(), 1, "open game at end of file is reported");
    }
}
