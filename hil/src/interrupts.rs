// Licensed under the Apache-2.0 license

/// Global interrupt enable flag of the executing hart.
pub trait InterruptControl {
    /// Allow interrupts to be taken.
    fn enable(&self);

    /// Mask all interrupts.
    fn disable(&self);

    /// Whether interrupts are currently enabled.
    fn are_enabled(&self) -> bool;
}

impl<T: InterruptControl + ?Sized> InterruptControl for &T {
    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }

    fn are_enabled(&self) -> bool {
        (**self).are_enabled()
    }
}
