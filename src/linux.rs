use std::ffi::CStr;
use std::os::raw::c_long;

use raw_window_handle::RawWindowHandle;
use x11_dl::xlib::{self, Xlib, _XDisplay};

use crate::{Error, Topmost};

// https://specifications.freedesktop.org/wm-spec/latest/ar01s05.html#id-1.6.8
const NET_WM_STATE_ADD: c_long = 1;

pub struct X11Topmost {
    instance: Xlib,
    display: *mut _XDisplay,
    window: xlib::Window,
    net_wm_state: xlib::Atom,
    net_wm_state_above: xlib::Atom,
}

impl X11Topmost {
    pub fn new(window: xlib::Window) -> Result<Self, Error> {
        let instance = xlib::Xlib::open()?;
        let display = unsafe { (instance.XOpenDisplay)(std::ptr::null()) };
        if display.is_null() {
            return Err("failed to retrieve display ptr".into());
        }
        let intern =
            |name: &CStr| unsafe { (instance.XInternAtom)(display, name.as_ptr(), xlib::False) };
        let net_wm_state = intern(c"_NET_WM_STATE");
        let net_wm_state_above = intern(c"_NET_WM_STATE_ABOVE");
        Ok(Self {
            instance,
            display,
            window,
            net_wm_state,
            net_wm_state_above,
        })
    }
}

impl Topmost for X11Topmost {
    fn reassert_topmost(&mut self) -> Result<(), Error> {
        unsafe {
            let root_window = (self.instance.XDefaultRootWindow)(self.display);

            // The window manager owns the stacking of managed windows, ask it for the
            // above state and raise in case there is no window manager at all.
            let mut message: xlib::XClientMessageEvent =
                std::mem::MaybeUninit::zeroed().assume_init();
            message.type_ = xlib::ClientMessage;
            message.window = self.window;
            message.message_type = self.net_wm_state;
            message.format = 32;
            message.data.set_long(0, NET_WM_STATE_ADD);
            message.data.set_long(1, self.net_wm_state_above as c_long);
            let mut event = xlib::XEvent {
                client_message: message,
            };
            let status = (self.instance.XSendEvent)(
                self.display,
                root_window,
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut event,
            );
            if status == 0 {
                return Err("failed to send _NET_WM_STATE to the root window".into());
            }
            (self.instance.XRaiseWindow)(self.display, self.window);
            (self.instance.XFlush)(self.display);
        }
        Ok(())
    }
}

impl Drop for X11Topmost {
    fn drop(&mut self) {
        unsafe {
            (self.instance.XCloseDisplay)(self.display);
        }
    }
}

pub fn topmost(raw: RawWindowHandle) -> Result<Option<Box<dyn Topmost>>, Error> {
    let window = match raw {
        RawWindowHandle::Xlib(handle) => handle.window as xlib::Window,
        RawWindowHandle::Xcb(handle) => handle.window.get() as xlib::Window,
        _ => return Ok(None),
    };
    Ok(Some(Box::new(X11Topmost::new(window)?)))
}
