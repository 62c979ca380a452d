use raw_window_handle::RawWindowHandle;
use windows::Win32::{
    Foundation::*,
    UI::WindowsAndMessaging::*,
};

use crate::{Error, Topmost};

pub struct WindowsTopmost {
    handle: HWND,
}

impl Topmost for WindowsTopmost {
    fn reassert_topmost(&mut self) -> Result<(), Error> {
        unsafe {
            SetWindowPos(
                self.handle,
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }
}

pub fn topmost(raw: RawWindowHandle) -> Result<Option<Box<dyn Topmost>>, Error> {
    match raw {
        RawWindowHandle::Win32(handle) => Ok(Some(Box::new(WindowsTopmost {
            handle: HWND(handle.hwnd.get() as _),
        }))),
        _ => Ok(None),
    }
}
