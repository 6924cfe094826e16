//! Servo channel wiring
//!
//! Pin assignments (STM32F103C8 "blue pill"):
//! - 0 base:        PA1 TIM2_CH2
//! - 1 shoulder:    PB8 TIM4_CH3
//! - 2 elbow:       PB9 TIM4_CH4
//! - 3 wrist pitch: PB6 TIM4_CH1
//! - 4 wrist roll:  PB7 TIM4_CH2
//! - 5 gripper:     PA6 TIM3_CH1

use embassy_stm32::peripherals::{TIM2, TIM3, TIM4};
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;

use wearm_core::config::ACTUATOR_COUNT;
use wearm_drivers::{PwmServo, PwmServoBank};

type Servo<T> = PwmServo<SimplePwmChannel<'static, T>>;

/// One PWM servo per actuator, owned by the controller task
pub struct ServoChannels {
    pub base: Servo<TIM2>,
    pub shoulder: Servo<TIM4>,
    pub elbow: Servo<TIM4>,
    pub wrist_pitch: Servo<TIM4>,
    pub wrist_roll: Servo<TIM4>,
    pub gripper: Servo<TIM3>,
}

impl ServoChannels {
    /// Address the channels by actuator id
    pub fn bank(&mut self) -> PwmServoBank<'_, ACTUATOR_COUNT> {
        PwmServoBank::new([
            &mut self.base,
            &mut self.shoulder,
            &mut self.elbow,
            &mut self.wrist_pitch,
            &mut self.wrist_roll,
            &mut self.gripper,
        ])
    }
}
