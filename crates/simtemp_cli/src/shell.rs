//! Shell de controle interativo.
//!
//! Um comando por linha; funciona sobre qualquer par `BufRead`/`Write`.

use crate::monitor::{SampleMonitor, format_entries, format_sample};
use simtemp_core::SimTemp;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "simtemp> ";

const HELP: &str = "\
Comandos:
  read [n]              lê n amostras (padrão 1)
  show <entrada>        mostra uma entrada de controle
  store <entrada> <v>   escreve v em uma entrada
  stats                 atalho para show stats
  reset                 atalho para store reset 1
  entries               mostra todas as entradas legíveis
  help                  esta ajuda
  quit                  sai
";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Read(u64),
    Show(&'a str),
    Store(&'a str, &'a str),
    Entries,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Result<Command<'_>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "" => Ok(Command::Empty),
        "read" if rest.is_empty() => Ok(Command::Read(1)),
        "read" => rest
            .parse()
            .map(Command::Read)
            .map_err(|_| format!("quantidade inválida: {rest:?}")),
        "show" if !rest.is_empty() => Ok(Command::Show(rest)),
        "store" => match rest.split_once(char::is_whitespace) {
            Some((entry, value)) => Ok(Command::Store(entry, value.trim())),
            None => Err("uso: store <entrada> <valor>".into()),
        },
        "stats" => Ok(Command::Show("stats")),
        "reset" => Ok(Command::Store("reset", "1")),
        "entries" => Ok(Command::Entries),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "show" => Err("uso: show <entrada>".into()),
        other => Err(format!("comando desconhecido: {other:?} (tente help)")),
    }
}

/// Executa o shell até `quit` ou fim da entrada.
pub fn run_shell<R: BufRead, W: Write>(device: &SimTemp, input: R, out: &mut W) -> io::Result<()> {
    let mut monitor = SampleMonitor::new(device);

    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Ok(Command::Help) => write!(out, "{HELP}")?,
            Ok(Command::Entries) => write!(out, "{}", format_entries(device))?,
            Ok(Command::Read(n)) => {
                for _ in 0..n {
                    match monitor.collect() {
                        Ok(sample) => writeln!(out, "{}", format_sample(&sample))?,
                        Err(e) => {
                            writeln!(out, "erro: {e}")?;
                            break;
                        }
                    }
                }
            }
            Ok(Command::Show(entry)) => match device.show_by_name(entry) {
                Ok(text) => write!(out, "{text}")?,
                Err(e) => writeln!(out, "erro: {e}")?,
            },
            Ok(Command::Store(entry, value)) => match device.store_by_name(entry, value) {
                Ok(_) => writeln!(out, "ok")?,
                Err(e) => writeln!(out, "erro: {e}")?,
            },
            Err(msg) => writeln!(out, "erro: {msg}")?,
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    Ok(())
}
