//! The bridge task: receive a line, run it on the keyboard, acknowledge it.

use core::future::Future;

use embassy_sync::channel::Receiver;
use embedded_hal_async::delay::DelayNs;

use crate::RawMutex;
use crate::channel::InputLine;
use crate::config::InterpreterConfig;
use crate::dispatch::{Dispatcher, KeyActionSink};
use crate::fmt::Text;
use crate::interpreter::{InputKind, interpret};

/// A long running task
pub trait Runnable {
    fn run(&mut self) -> impl Future<Output = ()>;
}

/// Sends the acknowledgment of a handled line back over the transport
pub trait AckNotifier {
    fn notify(&mut self, payload: &[u8]) -> impl Future<Output = ()>;
}

/// Handles received lines strictly one at a time.
pub struct Bridge<'a, S: KeyActionSink, D: DelayNs, A: AckNotifier, const N: usize> {
    input: Receiver<'a, RawMutex, InputLine, N>,
    dispatcher: Dispatcher<S, D>,
    notifier: A,
    config: InterpreterConfig,
}

impl<'a, S: KeyActionSink, D: DelayNs, A: AckNotifier, const N: usize> Bridge<'a, S, D, A, N> {
    pub fn new(
        input: Receiver<'a, RawMutex, InputLine, N>,
        dispatcher: Dispatcher<S, D>,
        notifier: A,
        config: InterpreterConfig,
    ) -> Self {
        Self {
            input,
            dispatcher,
            notifier,
            config,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<S, D> {
        &self.dispatcher
    }

    pub fn notifier(&self) -> &A {
        &self.notifier
    }

    /// Interpret and dispatch one write event, then acknowledge it.
    pub async fn handle(&mut self, raw: &[u8]) {
        let interpretation = interpret(raw, &self.config);
        self.dispatcher.dispatch(&interpretation).await;
        if interpretation.kind() == InputKind::Directive {
            info!("Special command: {}", Text(interpretation.input()));
        }
        if let Some(ack) = interpretation.acknowledgment() {
            self.notifier.notify(ack).await;
        }
    }
}

impl<S: KeyActionSink, D: DelayNs, A: AckNotifier, const N: usize> Runnable for Bridge<'_, S, D, A, N> {
    async fn run(&mut self) {
        loop {
            let line = self.input.receive().await;
            self.handle(&line).await;
        }
    }
}
