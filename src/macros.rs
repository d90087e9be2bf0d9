// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helper macros.

/// Returns a [`Pending`] marker out of the calling step body, declaring it
/// intentionally unimplemented.
///
/// ```rust
/// # use cucumber_dispatch::{pending, Steps};
/// let mut steps = Steps::<()>::new();
/// steps.then("^the fridge is cold$", |_, _| pending!("no fridge API yet"))?;
/// steps.then("^the fridge is empty$", |_, _| pending!())?;
/// # Ok::<_, cucumber_dispatch::error::RegistrationError>(())
/// ```
///
/// [`Pending`]: crate::error::Pending
#[macro_export]
macro_rules! pending {
    () => {
        $crate::step::pending($crate::error::Pending::DEFAULT_MESSAGE)
    };
    ($($msg:tt)+) => {
        $crate::step::pending(::std::format!($($msg)+))
    };
}
