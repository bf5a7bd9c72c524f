// Terminal front end for the palpites form.

pub mod tui;
