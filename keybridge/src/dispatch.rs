use core::future::Future;

use embedded_hal_async::delay::DelayNs;
use keybridge_types::action::KeyAction;
use keybridge_types::keycode::HidKeyCode;

use crate::interpreter::Step;

/// Receiver of the key actions produced by the interpreter.
///
/// Calls are awaited one at a time, in the order the actions were produced.
pub trait KeyActionSink {
    /// Hold a key
    fn press(&mut self, key: HidKeyCode) -> impl Future<Output = ()>;

    /// Let go of a key
    fn release(&mut self, key: HidKeyCode) -> impl Future<Output = ()>;

    /// Hold a key by its raw HID usage
    fn press_raw(&mut self, usage: u8) -> impl Future<Output = ()>;

    /// Let go of every key and modifier
    fn release_all(&mut self) -> impl Future<Output = ()>;

    /// Type a single character
    fn type_char(&mut self, c: char) -> impl Future<Output = ()>;
}

/// Runs steps against a key action sink, realizing waits with a delay provider.
pub struct Dispatcher<S: KeyActionSink, D: DelayNs> {
    sink: S,
    delay: D,
}

impl<S: KeyActionSink, D: DelayNs> Dispatcher<S, D> {
    pub fn new(sink: S, delay: D) -> Self {
        Self { sink, delay }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Dispatch every step in order.
    pub async fn dispatch<I: IntoIterator<Item = Step>>(&mut self, steps: I) {
        for step in steps {
            match step {
                Step::Key(action) => self.dispatch_action(action).await,
                Step::Wait(duration) => {
                    trace!("Wait {}ms", duration.as_millis());
                    let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
                    self.delay.delay_ms(ms).await;
                }
            }
        }
    }

    async fn dispatch_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(key) => self.sink.press(key).await,
            KeyAction::Release(key) => self.sink.release(key).await,
            KeyAction::PressRaw(usage) => self.sink.press_raw(usage).await,
            KeyAction::ReleaseAll => self.sink.release_all().await,
            KeyAction::Type(c) => self.sink.type_char(c).await,
        }
    }
}
