use std::io;

/// Fixed display locations, one per message family plus the unknown-id summary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    WheelA,
    WheelB,
    Secondary,
    Brake,
    Throttle,
    Engine,
    Fuel,
    Unknown,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::WheelA,
        Slot::WheelB,
        Slot::Secondary,
        Slot::Brake,
        Slot::Throttle,
        Slot::Engine,
        Slot::Fuel,
        Slot::Unknown,
    ];

    /// Screen row for this slot on a display `height` rows tall. Family slots are
    /// stacked from the top; the unknown summary sits three rows above the bottom.
    pub fn row(self, height: u16) -> u16 {
        match self {
            Slot::WheelA => 1,
            Slot::WheelB => 2,
            Slot::Secondary => 3,
            Slot::Brake => 4,
            Slot::Throttle => 5,
            Slot::Engine => 6,
            Slot::Fuel => 7,
            Slot::Unknown => height.saturating_sub(3),
        }
    }
}

/// Replace the content of `slot` with `text`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderRequest {
    pub slot: Slot,
    pub text: String,
}

impl RenderRequest {
    pub fn new(slot: Slot, text: impl Into<String>) -> Self {
        Self {
            slot,
            text: text.into(),
        }
    }
}

/// Consumer of render requests. Each request clears the slot before writing.
pub trait DisplaySink {
    fn render(&mut self, request: &RenderRequest) -> io::Result<()>;
}

/// Records requests in arrival order; handy for headless runs and tests.
impl DisplaySink for Vec<RenderRequest> {
    fn render(&mut self, request: &RenderRequest) -> io::Result<()> {
        self.push(request.clone());
        Ok(())
    }
}
