use bitflags::bitflags;

bitflags! {
    /// Modifiers of a declared method, with the bits they have in `method_info.access_flags`
    ///
    /// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.6>
    #[derive(Default)]
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;

        const VISIBILITY = Self::PUBLIC.bits | Self::PRIVATE.bits | Self::PROTECTED.bits;
    }
}

impl MethodAccessFlags {
    /// Whether the method is neither `public`, `protected`, nor `private`
    pub fn is_package_private(self) -> bool {
        !self.intersects(Self::VISIBILITY)
    }
}
