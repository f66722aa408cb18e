mod common;
pub(crate) use crate::common::*;

mod bridge_test {
    use super::*;

    use embassy_futures::block_on;
    use embassy_futures::select::select;
    use embassy_futures::yield_now;
    use embassy_sync::channel::Channel;
    use keybridge::channel::{INPUT_CHANNEL, InputLine, input_line};
    use keybridge::hid::HidKeyboard;
    use keybridge::types::keycode::HidKeyCode;
    use keybridge::{Bridge, Dispatcher, RawMutex, Runnable};

    /// Run `bridge` until every queued line is handled
    async fn drain<R: Runnable>(bridge: &mut R) {
        select(bridge.run(), async {
            for _ in 0..10 {
                yield_now().await;
            }
        })
        .await;
    }

    #[test]
    fn test_handle_acknowledges_after_actions() {
        let log = new_log();
        let channel: Channel<RawMutex, InputLine, 4> = Channel::new();
        let mut bridge = Bridge::new(
            channel.receiver(),
            recording_dispatcher(&log),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        block_on(bridge.handle(b"!ENTER"));
        assert_eq!(log.take(), vec![
            Trace::Press(HidKeyCode::Enter),
            Trace::Release(HidKeyCode::Enter),
            Trace::Notify(b"OK".to_vec()),
        ]);
    }

    #[test]
    fn test_directive_line_runs_once() {
        let log = new_log();
        let channel: Channel<RawMutex, InputLine, 4> = Channel::new();
        let mut bridge = Bridge::new(
            channel.receiver(),
            recording_dispatcher(&log),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        let expected = vec![
            Trace::Press(HidKeyCode::LCtrl),
            Trace::Press(HidKeyCode::S),
            Trace::ReleaseAll,
            Trace::Notify(b"OK".to_vec()),
        ];
        for _ in 0..2 {
            block_on(bridge.handle(b" !CTRL+S\r\n"));
            assert_eq!(log.take(), expected);
        }
    }

    #[test]
    fn test_acknowledgment_gate() {
        let log = new_log();
        let channel: Channel<RawMutex, InputLine, 4> = Channel::new();
        let mut bridge = Bridge::new(
            channel.receiver(),
            recording_dispatcher(&log),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        // Nothing at all, not even an acknowledgment
        block_on(bridge.handle(b""));
        assert!(log.take().is_empty());

        // Whitespace only is acknowledged without key actions
        block_on(bridge.handle(b" \r\n"));
        assert_eq!(log.take(), vec![Trace::Notify(b"OK".to_vec())]);

        // Unknown directives too
        block_on(bridge.handle(b"!UNKNOWN"));
        assert_eq!(log.take(), vec![Trace::Notify(b"OK".to_vec())]);
    }

    #[test]
    fn test_run_handles_lines_in_order() {
        let log = new_log();
        let channel: Channel<RawMutex, InputLine, 4> = Channel::new();
        let mut bridge = Bridge::new(
            channel.receiver(),
            recording_dispatcher(&log),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        for line in ["hi", "", "!F2||x"] {
            channel.try_send(input_line(line.as_bytes())).unwrap();
        }
        block_on(drain(&mut bridge));

        let mut expected = typed("hi");
        expected.push(Trace::Notify(b"OK".to_vec()));
        expected.extend([
            Trace::Press(HidKeyCode::F2),
            Trace::Release(HidKeyCode::F2),
            Trace::Wait(50),
            Trace::Type('x'),
            Trace::Notify(b"OK".to_vec()),
        ]);
        assert_eq!(log.take(), expected);
    }

    #[test]
    fn test_sticky_ctrl_across_lines() {
        let log = new_log();
        let channel: Channel<RawMutex, InputLine, 4> = Channel::new();
        let mut bridge = Bridge::new(
            channel.receiver(),
            Dispatcher::new(HidKeyboard::new(ReportLog::default()), RecordingDelay(log.clone())),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        for line in ["!HOLD+CTRL", "c", "!RELEASE"] {
            channel.try_send(input_line(line.as_bytes())).unwrap();
        }
        block_on(drain(&mut bridge));

        assert_eq!(bridge.dispatcher().sink().writer().reports, vec![
            report(KC_LCTRL, &[]),
            report(KC_LCTRL, &[HidKeyCode::C]),
            report(KC_LCTRL, &[]),
            report(0, &[]),
        ]);
        assert_eq!(log.take().iter().filter(|t| matches!(t, Trace::Notify(_))).count(), 3);
    }

    #[test]
    fn test_static_input_channel() {
        let log = new_log();
        let mut bridge = Bridge::new(
            INPUT_CHANNEL.receiver(),
            recording_dispatcher(&log),
            RecordingNotifier(log.clone()),
            test_config(),
        );

        INPUT_CHANNEL.try_send(input_line(b"ok\n")).unwrap();
        block_on(drain(&mut bridge));

        let mut expected = typed("ok");
        expected.extend([
            Trace::Press(HidKeyCode::Enter),
            Trace::Release(HidKeyCode::Enter),
            Trace::Notify(b"OK".to_vec()),
        ]);
        assert_eq!(log.take(), expected);
    }
}
