use std::io::{self, BufRead};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    New,                       // new
    Show,                      // show
    Move(String),              // move <from><to>
    Moves(String),             // moves <square>
    Go,                        // go
    State,                     // state
    Save(String),              // save <path>
    Load(String),              // load <path>
    SetOption(String, String), // set <name> <value>
    Perft(String),             // perft <depth>
    Quit,                      // quit the program

    Invalid(String), // placeholder for invalid commands so we can pattern match
}

impl GameCommand {
    /// Reads one command from stdin; end of input counts as `quit`.
    pub fn receive() -> GameCommand {
        Self::receive_from(&mut io::stdin().lock())
    }

    pub fn receive_from<R: BufRead>(reader: &mut R) -> GameCommand {
        let mut input = String::new();

        match reader.read_line(&mut input) {
            Ok(0) => GameCommand::Quit,
            Ok(_) => Self::parse(&input),
            Err(e) => {
                log::warn!("Failed to read command: {}", e);
                GameCommand::Quit
            }
        }
    }

    pub fn parse(input: &str) -> GameCommand {
        let parts = input.split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            ["new"] => GameCommand::New,
            ["show"] => GameCommand::Show,
            ["move", notation] => GameCommand::Move(notation.to_string()),
            ["moves", square] => GameCommand::Moves(square.to_string()),
            ["go"] => GameCommand::Go,
            ["state"] => GameCommand::State,
            ["save", path @ ..] if !path.is_empty() => GameCommand::Save(path.join(" ")),
            ["load", path @ ..] if !path.is_empty() => GameCommand::Load(path.join(" ")),
            ["set", name, value] => GameCommand::SetOption(name.to_string(), value.to_string()),
            ["perft", depth] => GameCommand::Perft(depth.to_string()),
            ["quit"] => GameCommand::Quit,
            _ => GameCommand::Invalid(input.trim().to_string()),
        }
    }
}
