use awsm_breakout::consts::BG_COLOR;
use awsm_breakout::platform::abi::{KEY_BLUR, KEY_LEFT, Touch};
use awsm_breakout::platform::host::{HostCall, RecordingHost};
use awsm_breakout::sim::{InputMode, Movement};
use awsm_breakout::{Cartridge, Settings};

fn run_frame(cart: &mut Cartridge, keys: u32, touch: Option<Touch>) -> RecordingHost {
    let local = &mut cart.input_mut().inputs[0];
    local.keys = keys;
    local.touches = Default::default();
    if let Some(touch) = touch {
        local.touches[0] = touch;
    }
    let mut host = RecordingHost::new();
    cart.update(&mut host);
    host
}

fn blur_off() -> Settings {
    let mut settings = Settings::default();
    settings.compositor.enabled = false;
    settings
}

#[test]
fn test_five_frames_of_left() {
    let mut cart = Cartridge::default();
    for _ in 0..5 {
        run_frame(&mut cart, KEY_LEFT, None);
    }
    let player = &cart.state().player;
    assert_eq!(player.vel.x, -3.0);
    assert!((player.pos.x - 39.52).abs() < 1e-3);
    assert_eq!(cart.state().timer, 5);
}

#[test]
fn test_touch_release_coasts_to_a_stop() {
    let mut cart = Cartridge::default();
    for g in 1..=3 {
        run_frame(&mut cart, 0, Some(Touch::new(20, 150, g)));
    }
    assert_eq!(cart.state().input_mode, InputMode::Touch);
    assert_eq!(cart.state().player.vel.x, -3.0);

    let mut last = cart.state().player.vel.x.abs();
    for _ in 0..10 {
        run_frame(&mut cart, 0, None);
        let player = &cart.state().player;
        assert_eq!(player.movement, Movement::None);
        assert!(player.vel.x.abs() < last);
        last = player.vel.x.abs();
    }
    assert_eq!(cart.state().input_mode, InputMode::Touch);
}

#[test]
fn test_blur_toggles_on_press_not_hold() {
    let mut cart = Cartridge::default();
    assert!(cart.state().blur_mode);

    let host = run_frame(&mut cart, KEY_BLUR, None);
    assert!(!cart.state().blur_mode);
    assert!(host.calls.contains(&HostCall::FillScreen(BG_COLOR)));
    assert_eq!(host.traces().collect::<Vec<_>>(), ["blur: off"]);

    let host = run_frame(&mut cart, KEY_BLUR, None);
    assert!(!cart.state().blur_mode);
    assert_eq!(host.traces().count(), 0);

    run_frame(&mut cart, 0, None);
    let host = run_frame(&mut cart, KEY_BLUR, None);
    assert!(cart.state().blur_mode);
    assert!(!host.calls.contains(&HostCall::FillScreen(BG_COLOR)));
    assert_eq!(host.traces().collect::<Vec<_>>(), ["blur: on"]);
}

#[test]
fn test_draw_calls_per_mode() {
    let mut cart = Cartridge::new(blur_off());

    let host = run_frame(&mut cart, 0, None);
    // paddle, 76 border blocks, ball
    assert_eq!(host.sheet_draws().count(), 78);
    let blits = host.calls.iter().filter(|c| matches!(c, HostCall::Blit { .. }));
    assert_eq!(blits.count(), 1);

    let host = run_frame(&mut cart, 0, Some(Touch::new(100, 150, 1)));
    assert_eq!(host.sheet_draws().count(), 80);
    assert_eq!(host.traces().collect::<Vec<_>>(), ["input: touch"]);
}

#[test]
fn test_replayed_frame_shows_paddle_over_background() {
    let mut cart = Cartridge::new(blur_off());
    let paddle_color = [0xff, 0x00, 0x00, 0xff];
    cart.spritesheet_mut().fill_rect(0, 8, 22, 7, paddle_color);
    let sheet = cart.spritesheet().clone();

    let host = run_frame(&mut cart, 0, None);
    host.replay(&sheet, cart.framebuffer_mut());

    let fb = cart.framebuffer();
    assert_eq!(fb.pixel(53, 144), Some(paddle_color));
    assert_eq!(fb.pixel(74, 150), Some(paddle_color));
    // Untextured border blocks are fully transparent and leave the clear color
    assert_eq!(fb.pixel(1, 1), Some(BG_COLOR.to_be_bytes()));
    assert_eq!(fb.pixel(30, 100), Some(BG_COLOR.to_be_bytes()));
}

#[test]
fn test_rejected_settings_keep_the_frame_loop_alive() {
    let mut settings = Settings::default();
    settings.paddle.max_speed = -1.0;
    assert!(Cartridge::try_new(settings).is_err());

    let mut cart = Cartridge::new(settings);
    for _ in 0..5 {
        run_frame(&mut cart, KEY_LEFT, None);
    }
    assert_eq!(cart.state().player.vel.x, -3.0);
}

#[test]
fn test_descriptor_points_at_live_buffers() {
    let mut cart = Cartridge::default();
    let descriptor = *cart.configure();
    assert_eq!(*cart.configure(), descriptor);

    let input_addr = cart.input_mut() as *mut _ as usize;
    assert_eq!(descriptor.input.addr, input_addr);
    let fb_addr = cart.framebuffer().as_bytes().as_ptr() as usize;
    assert_eq!(descriptor.framebuffer.addr, fb_addr);
}
