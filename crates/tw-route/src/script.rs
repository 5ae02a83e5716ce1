//! Plain-text route format.
//!
//! # Format
//!
//! One command per line; blank lines are ignored, and `#` starts a comment
//! at the beginning of a line or after whitespace (so `follower#1` survives).  The
//! directives `repeat` and `skippable` set the route flags and may appear
//! anywhere.
//!
//! ```text
//! # pace the counter
//! repeat
//! move left
//! wait 30
//! move right
//! turn toward player
//! sound door_open
//! ```
//!
//! | Line                                  | Command                      |
//! |---------------------------------------|------------------------------|
//! | `move <dir>`                          | `Move(dir)`                  |
//! | `move random|forward|backward`        | random / forward / backward  |
//! | `move toward|away <who>`              | `MoveToward` / `MoveAway`    |
//! | `jump <dx> <dy>`                      | `Jump`                       |
//! | `wait <ticks>`                        | `Wait`                       |
//! | `turn <dir>`                          | `Turn(dir)`                  |
//! | `turn right90|left90|180|right_or_left90|random` | relative turns    |
//! | `turn toward|away <who>`              | `TurnToward` / `TurnAway`    |
//! | `speed <n>` / `frequency <n>`         | tunables                     |
//! | `walk_anime|step_anime|direction_fix|through|transparent on|off` | flags |
//! | `image <name> <index>`                | `ChangeImage`                |
//! | `opacity <n>` / `blend <n>`           | visuals                      |
//! | `switch <id> on|off`                  | `Invoke(SetSwitch)`          |
//! | `sound <name>`                        | `Invoke(PlaySound)`          |
//! | `script <text…>`                      | `Invoke(Script)`             |
//!
//! `<dir>` is a direction name (`down`, `up_left`, …) or numpad code;
//! `<who>` is `player`, `follower#N`, `entity#N` or `vehicle:KIND`.

use std::str::FromStr;

use tw_core::{CharacterRef, Direction, EntityId, VehicleKind};

use crate::{ExternalCall, MoveCommand, MoveRoute, RouteError, RouteResult};

/// Parse a whole route.
pub fn parse_route(text: &str) -> RouteResult<MoveRoute> {
    let mut route = MoveRoute::default();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.find(" #").map_or(raw, |i| &raw[..i]).trim();
        match line {
            "" => {}
            _ if line.starts_with('#') => {}
            "repeat" => route.repeat = true,
            "skippable" => route.skippable = true,
            _ => {
                let command = parse_command(line)
                    .map_err(|message| RouteError::Parse { line: i + 1, message })?;
                route.push(command);
            }
        }
    }
    Ok(route)
}

/// Parse a single command line.
pub fn parse_command(line: &str) -> Result<MoveCommand, String> {
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or("empty command")?;
    let args: Vec<&str> = words.collect();

    let command = match (keyword, args.as_slice()) {
        ("move", ["random"]) => MoveCommand::MoveRandom,
        ("move", ["forward"]) => MoveCommand::MoveForward,
        ("move", ["backward"]) => MoveCommand::MoveBackward,
        ("move", ["toward", who]) => MoveCommand::MoveToward(parse_ref(who)?),
        ("move", ["away", who]) => MoveCommand::MoveAway(parse_ref(who)?),
        ("move", [dir]) => MoveCommand::Move(parse_dir(dir)?),
        ("jump", [dx, dy]) => MoveCommand::Jump { dx: parse_num(dx)?, dy: parse_num(dy)? },
        ("wait", [n]) => MoveCommand::Wait(parse_num(n)?),

        ("turn", ["right90"]) => MoveCommand::TurnRight90,
        ("turn", ["left90"]) => MoveCommand::TurnLeft90,
        ("turn", ["180"]) => MoveCommand::Turn180,
        ("turn", ["right_or_left90"]) => MoveCommand::TurnRightOrLeft90,
        ("turn", ["random"]) => MoveCommand::TurnRandom,
        ("turn", ["toward", who]) => MoveCommand::TurnToward(parse_ref(who)?),
        ("turn", ["away", who]) => MoveCommand::TurnAway(parse_ref(who)?),
        ("turn", [dir]) => MoveCommand::Turn(parse_dir(dir)?),

        ("speed", [n]) => MoveCommand::ChangeSpeed(parse_num(n)?),
        ("frequency", [n]) => MoveCommand::ChangeFrequency(parse_num(n)?),
        ("walk_anime", [v]) => MoveCommand::WalkAnime(parse_switch(v)?),
        ("step_anime", [v]) => MoveCommand::StepAnime(parse_switch(v)?),
        ("direction_fix", [v]) => MoveCommand::DirectionFix(parse_switch(v)?),
        ("through", [v]) => MoveCommand::Through(parse_switch(v)?),
        ("transparent", [v]) => MoveCommand::Transparent(parse_switch(v)?),
        ("image", [name, index]) => {
            MoveCommand::ChangeImage { name: name.to_string(), index: parse_num(index)? }
        }
        ("opacity", [n]) => MoveCommand::ChangeOpacity(parse_num(n)?),
        ("blend", [n]) => MoveCommand::ChangeBlendMode(parse_num(n)?),

        ("switch", [id, v]) => {
            MoveCommand::Invoke(ExternalCall::SetSwitch { id: parse_num(id)?, value: parse_switch(v)? })
        }
        ("sound", [name]) => MoveCommand::Invoke(ExternalCall::PlaySound(name.to_string())),
        ("script", rest) if !rest.is_empty() => {
            MoveCommand::Invoke(ExternalCall::Script(rest.join(" ")))
        }
        _ => return Err(format!("unrecognised command {line:?}")),
    };
    Ok(command)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_dir(s: &str) -> Result<Direction, String> {
    s.parse::<Direction>().map_err(|e| e.to_string())
}

fn parse_num<T: FromStr>(s: &str) -> Result<T, String> {
    s.parse::<T>().map_err(|_| format!("invalid number {s:?}"))
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(format!("expected on/off, got {other:?}")),
    }
}

fn parse_ref(s: &str) -> Result<CharacterRef, String> {
    if s == "player" {
        return Ok(CharacterRef::Player);
    }
    if let Some(n) = s.strip_prefix("follower#") {
        return Ok(CharacterRef::Follower(parse_num(n)?));
    }
    if let Some(n) = s.strip_prefix("entity#") {
        return Ok(CharacterRef::Entity(EntityId(parse_num(n)?)));
    }
    if let Some(kind) = s.strip_prefix("vehicle:") {
        return VehicleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == kind)
            .map(CharacterRef::Vehicle)
            .ok_or_else(|| format!("unknown vehicle {kind:?}"));
    }
    Err(format!("unknown character reference {s:?}"))
}
