//! Satchel headless driver
//!
//! Loads an inventory configuration and executes text commands against it,
//! one per line on stdin, printing the board after every change.
//!
//! Run with: cargo run -p satchel_cli -- inventory.toml

mod boot;
mod command;

use boot::ConfigSource;
use command::{Command, HELP};
use satchel_grid::{Item, ItemId, PlacementEngine, RemoveMode};
use std::io::{self, BufRead, Write};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let source = ConfigSource::resolve(std::env::args(), |key| std::env::var(key).ok());
    log::info!("Using inventory config: {}", source);

    let engine = match source.load().and_then(|config| config.build()) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to load inventory from {}: {}", source, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(engine, io::stdin().lock(), io::stdout().lock()) {
        log::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

/// Engine plus the items picked up off the grid and not yet dropped
struct Session {
    engine: PlacementEngine,
    hand: Vec<Item>,
}

impl Session {
    fn new(engine: PlacementEngine) -> Self {
        Self {
            engine,
            hand: Vec::new(),
        }
    }

    /// Resolve an ID to a known item: on the grid, in the pool or in hand
    fn lookup(&self, id: ItemId) -> Option<Item> {
        self.engine
            .placed()
            .into_iter()
            .map(|p| p.item)
            .find(|item| item.id == id)
            .or_else(|| self.engine.pool().get(id))
            .or_else(|| self.hand.iter().copied().find(|item| item.id == id))
    }

    fn take_from_hand(&mut self, id: ItemId) -> Option<Item> {
        let index = self.hand.iter().position(|item| item.id == id)?;
        Some(self.hand.remove(index))
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<()> {
        match command {
            Command::Spawn(kind) => match self.engine.spawn(kind) {
                Some(item) => writeln!(out, "spawned item {}", item.id)?,
                None => writeln!(out, "no item kind {}", kind.0)?,
            },
            Command::Place(id, at) | Command::Check(id, at) => {
                let Some(item) = self.lookup(id) else {
                    return writeln!(out, "no item {}", id);
                };
                match self.engine.check_placement(&item, at) {
                    Err(rejection) => writeln!(out, "cannot place item {} at {}: {}", id, at, rejection)?,
                    Ok(()) if matches!(command, Command::Check(..)) => {
                        writeln!(out, "item {} fits at {}", id, at)?
                    }
                    Ok(()) => {
                        self.engine.place(item, at);
                        self.take_from_hand(id);
                        writeln!(out, "{}\n", self.engine.grid())?;
                    }
                }
            }
            Command::Remove(id) => {
                if self.engine.remove(id, RemoveMode::ReturnToPool).is_some() {
                    writeln!(out, "{}\n", self.engine.grid())?;
                } else if let Some(item) = self.take_from_hand(id) {
                    self.engine.add_to_pool(item);
                    writeln!(out, "item {} returned to the pool", id)?;
                } else {
                    writeln!(out, "item {} is not on the grid or in hand", id)?;
                }
            }
            Command::Pickup(id) => match self.engine.pickup(id) {
                Some(item) => {
                    self.hand.push(item);
                    writeln!(out, "{}\n", self.engine.grid())?;
                }
                None => writeln!(out, "item {} is not on the grid", id)?,
            },
            Command::Pool => self.print_pool(out)?,
            Command::Show => writeln!(out, "{}\n", self.engine.grid())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }

        for event in self.engine.drain_events() {
            log::debug!("{:?}", event);
        }
        Ok(())
    }

    fn print_pool(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_items("pool", self.engine.pool().iter().copied(), out)?;
        if !self.hand.is_empty() {
            self.print_items("hand", self.hand.iter().copied(), out)?;
        }
        Ok(())
    }

    fn print_items(
        &self,
        label: &str,
        items: impl Iterator<Item = Item>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let mut items = items.peekable();
        if items.peek().is_none() {
            return writeln!(out, "{}: empty", label);
        }
        writeln!(out, "{}:", label)?;
        for item in items {
            let name = self.engine.catalog().get(item.kind).map_or("?", |d| d.name.as_str());
            writeln!(out, "  {:>3}  {}", item.id, name)?;
        }
        Ok(())
    }
}

fn run(engine: PlacementEngine, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    let mut session = Session::new(engine);
    writeln!(out, "{}\n", session.engine.grid())?;
    session.print_pool(&mut out)?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        session.execute(command, &mut out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> String {
        let engine = ConfigSource::BuiltIn.load().unwrap().build().unwrap();
        let mut out = Vec::new();
        run(engine, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_place_and_remove_session() {
        // Item 3 is the first grenade in the built-in pool
        let out = session("place 3 0 0\nremove 3\npool\nquit\nplace 3 0 0\n");

        assert!(out.contains("D########"));
        assert!(!out.contains("cannot place"));

        let last_pool = out.rsplit("pool:").next().unwrap();
        assert!(last_pool.contains("  3  Grenade"));
    }

    #[test]
    fn test_picked_up_item_stays_reachable() {
        let out = session("place 3 0 0\npickup 3\npool\nplace 3 5 0\npickup 3\nremove 3\npool\n");

        assert!(!out.contains("no item 3"));
        assert!(!out.contains("cannot place"));
        assert!(out.contains("hand:\n    3  Grenade"));
        assert!(out.contains("#####D###"));
        assert!(out.contains("item 3 returned to the pool"));

        // Back in the pool and no longer held
        let last_pool = out.rsplit("pool:").next().unwrap();
        assert!(last_pool.contains("  3  Grenade"));
        assert!(!last_pool.contains("hand:"));
    }

    #[test]
    fn test_rejections_are_reported() {
        let out = session("place 3 0 1\ncheck 2 5 0\nplace 99 0 0\nbogus\n");

        assert!(out.contains("cannot place item 3 at (0, 1): cell (0, 1) is not part of the board"));
        assert!(out.contains("item 2 fits at (5, 0)"));
        assert!(out.contains("no item 99"));
        assert!(out.contains("error: unknown command 'bogus'"));
    }
}
