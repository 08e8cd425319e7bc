use core::fmt;

/// The macro to define [`ResultCode`].
macro_rules! define_result_code {
    (
        $( #[$meta:meta] )*
        pub enum ResultCode {
            $(
                $( #[$vmeta:meta] )*
                $vname:ident = $vd:expr => $vdesc:literal
            ),* $(,)*
        }
    ) => {
        $( #[$meta] )*
        pub enum ResultCode {
            $(
                $( #[$vmeta] )*
                $vname = $vd
            ),*
        }

        impl ResultCode {
            /// Get the short name of the result code.
            ///
            /// # Examples
            ///
            /// ```
            /// use max6675::ResultCode;
            /// assert_eq!(ResultCode::OpenThermocouple.as_str(), "OpenThermocouple");
            /// ```
            pub fn as_str(self) -> &'static str {
                match self {
                    $(
                        Self::$vname => stringify!($vname),
                    )*
                }
            }

            /// Get a human-readable description of the result code.
            pub fn description(self) -> &'static str {
                match self {
                    $(
                        Self::$vname => $vdesc,
                    )*
                }
            }

            /// Get the numeric status code.
            #[inline]
            pub fn code(self) -> u8 {
                self as u8
            }
        }

        impl fmt::Debug for ResultCode {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Display for ResultCode {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.description())
            }
        }
    };
}

define_result_code! {
    /// All result codes (including success) that a driver operation can
    /// produce.
    ///
    /// The discriminants are the numeric status codes reported by the
    /// vendor's C driver API, so `ResultCode::code` can be handed to code
    /// that expects those numbers. Code `2` ("handle is null") has no
    /// counterpart here because a [`Max6675`] reference can't be null.
    ///
    /// [`Max6675`]: crate::Max6675
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[repr(u8)]
    pub enum ResultCode {
        /// The operation was successful.
        Success = 0 => "success",
        /// The bus interface reported an error while initializing,
        /// deinitializing, or clocking out a frame.
        BusFailure = 1 => "bus operation failed",
        /// The handle has not been initialized by [`Max6675::init`] (or it
        /// has been closed by [`Max6675::deinit`] since).
        ///
        /// [`Max6675::init`]: crate::Max6675::init
        /// [`Max6675::deinit`]: crate::Max6675::deinit
        NotInitialized = 3 => "handle is not initialized",
        /// The conversion frame has its open-input bit set: no thermocouple
        /// is attached to T+/T-.
        OpenThermocouple = 4 => "thermocouple input is open",
    }
}

/// The macro to define an error type that is a subset of [`ResultCode`].
macro_rules! define_error {
    (
        mod $mod_name:ident {}
        $( #[$meta:meta] )*
        $vis:vis enum $name:ident {
            $(
                $( #[$vmeta:meta] )*
                $vname:ident
            ),* $(,)*
        }
    ) => {
        $( #[$meta] )*
        ///
        /// See [`ResultCode`] for all result codes and generic descriptions.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        $vis enum $name {
            $(
                $( #[$vmeta] )*
                // Use the same discriminants as `ResultCode`
                $vname = ResultCode::$vname as u8
            ),*
        }

        impl fmt::Debug for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(&ResultCode::from(*self), f)
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&ResultCode::from(*self), f)
            }
        }

        impl core::error::Error for $name {}

        impl<T> From<Result<T, $name>> for ResultCode {
            #[inline]
            fn from(x: Result<T, $name>) -> Self {
                match x {
                    Ok(_) => Self::Success,
                    Err(e) => Self::from(e),
                }
            }
        }

        impl From<$name> for ResultCode {
            #[inline]
            fn from(x: $name) -> Self {
                match x {
                    $(
                        $name::$vname => Self::$vname,
                    )*
                }
            }
        }

        #[cfg(test)]
        mod $mod_name {
            use super::*;

            #[test]
            fn to_result_code() {
                $(
                    assert_eq!(
                        ResultCode::$vname,
                        ResultCode::from($name::$vname),
                    );
                    assert_eq!(
                        ResultCode::$vname.code(),
                        $name::$vname as u8,
                    );
                )*
            }

            #[test]
            fn result_to_result_code() {
                $(
                    assert_eq!(
                        ResultCode::$vname,
                        ResultCode::from(Result::<(), _>::Err($name::$vname)),
                    );
                )*
                assert_eq!(
                    ResultCode::Success,
                    ResultCode::from(Result::<(), $name>::Ok(())),
                );
            }
        }
    };
}

define_error! {
    mod init_error {}
    /// Error type for [`Max6675::init`].
    ///
    /// [`Max6675::init`]: crate::Max6675::init
    pub enum InitError {
        /// The bus could not be initialized, or the priming read failed.
        BusFailure,
    }
}

define_error! {
    mod deinit_error {}
    /// Error type for [`Max6675::deinit`].
    ///
    /// [`Max6675::deinit`]: crate::Max6675::deinit
    pub enum DeinitError {
        /// The bus could not be deinitialized. The handle stays initialized.
        BusFailure,
        /// The handle is not initialized.
        NotInitialized,
    }
}

define_error! {
    mod read_error {}
    /// Error type for [`Max6675::read`].
    ///
    /// [`Max6675::read`]: crate::Max6675::read
    pub enum ReadError {
        /// The frame could not be clocked out.
        BusFailure,
        /// The handle is not initialized.
        NotInitialized,
        /// The thermocouple input is open.
        OpenThermocouple,
    }
}

define_error! {
    mod get_reg_error {}
    /// Error type for [`Max6675::get_reg`].
    ///
    /// [`Max6675::get_reg`]: crate::Max6675::get_reg
    pub enum GetRegError {
        /// The frame could not be clocked out.
        BusFailure,
        /// The handle is not initialized.
        NotInitialized,
    }
}

impl From<GetRegError> for ReadError {
    #[inline]
    fn from(x: GetRegError) -> Self {
        match x {
            GetRegError::BusFailure => Self::BusFailure,
            GetRegError::NotInitialized => Self::NotInitialized,
        }
    }
}
