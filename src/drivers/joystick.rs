// Energy Monitor - Joystick ADC Driver
//
// One-shot ADC reads of the joystick X axis through raw ESP-IDF calls.
// GPIO2 / ADC1_CHANNEL_2 with 11 dB attenuation (0-3.3 V range), 12-bit.

use esp_idf_sys::{self as sys, esp};

use energymon::sampling::SampleSource;

pub struct Joystick {
    handle: sys::adc_oneshot_unit_handle_t,
    channel: sys::adc_channel_t,
    last: u16,
}

impl Joystick {
    pub fn new() -> anyhow::Result<Self> {
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        let channel = sys::adc_channel_t_ADC_CHANNEL_2; // GPIO2

        // SAFETY: plain C configuration structs; the handle is owned by `Self`
        // and released in `Drop`.
        unsafe {
            let unit_cfg = sys::adc_oneshot_unit_init_cfg_t {
                unit_id: sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            esp!(sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))?;

            let chan_cfg = sys::adc_oneshot_chan_cfg_t {
                atten: sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            esp!(sys::adc_oneshot_config_channel(handle, channel, &chan_cfg))?;
        }

        log::info!("Joystick ADC ready (GPIO{})", energymon::config::PIN_JOYSTICK_ADC);
        Ok(Self {
            handle,
            channel,
            last: 0,
        })
    }
}

impl SampleSource for Joystick {
    fn read(&mut self) -> u16 {
        let mut raw: i32 = 0;
        // SAFETY: `handle` was created by `adc_oneshot_new_unit` and is live.
        let ret = unsafe { sys::adc_oneshot_read(self.handle, self.channel, &mut raw) };
        if ret != sys::ESP_OK {
            // Keep the previous value so a glitch reads as "no change".
            log::warn!("ADC read failed ({})", ret);
            return self.last;
        }
        self.last = raw.clamp(0, i32::from(u16::MAX)) as u16;
        self.last
    }
}

impl Drop for Joystick {
    fn drop(&mut self) {
        // SAFETY: the handle is not used after this point.
        unsafe {
            sys::adc_oneshot_del_unit(self.handle);
        }
    }
}
