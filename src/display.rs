//! A trait whose provided method leans on a helper outside the trait.
//!
//! Implementors only write `set_up`. `interface_name` is private to this
//! module, so callers reach it solely through `display_interface_name`.

pub trait DisplayService {
    fn set_up(&mut self);

    fn display_interface_name(&self) -> String {
        interface_name()
    }
}

fn interface_name() -> String {
    String::from("DisplayService")
}

#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    ready: bool,
}

impl ConsoleDisplay {
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl DisplayService for ConsoleDisplay {
    fn set_up(&mut self) {
        self.ready = true;
    }
}
