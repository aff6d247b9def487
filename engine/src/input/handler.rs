//! Input Handler
//!
//! Translates winit window and device events into the platform-agnostic
//! [`InputState`]. This is the only place the engine touches winit types.

use winit::event::{DeviceEvent, ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::{InputState, KeyCode, MouseButton};

/// Map a winit physical key code to the engine key code.
pub fn translate_key(key: WinitKeyCode) -> KeyCode {
    match key {
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

/// Map a winit mouse button to the engine mouse button.
pub fn translate_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Feed a window event into the input state.
///
/// Returns `true` if the event was consumed.
///
/// - Key presses/releases update held keys (OS key-repeat is ignored)
/// - Mouse button presses update held buttons and the click latch
/// - Escape releases the pointer lock
/// - Losing focus releases everything so keys cannot stick
pub fn handle_window_event(input: &mut InputState, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return true;
            }
            let PhysicalKey::Code(code) = event.physical_key else {
                return false;
            };
            let key = translate_key(code);
            let pressed = event.state == ElementState::Pressed;
            if key == KeyCode::Escape && pressed {
                input.set_pointer_locked(false);
            }
            input.handle_key(key, pressed);
            true
        }
        WindowEvent::MouseInput { state, button, .. } => {
            input.set_button(translate_button(*button), *state == ElementState::Pressed);
            true
        }
        WindowEvent::Focused(false) => {
            input.reset();
            true
        }
        _ => false,
    }
}

/// Feed a device event into the input state.
///
/// Raw `MouseMotion` is what drives look while the pointer is locked;
/// cursor-position events are not used.
pub fn handle_device_event(input: &mut InputState, event: &DeviceEvent) -> bool {
    match event {
        DeviceEvent::MouseMotion { delta } => {
            input.accumulate_mouse_motion(delta.0 as f32, delta.1 as f32);
            true
        }
        _ => false,
    }
}
