//! Built-in package type catalogue.
//!
//! The table is ordered: ecosystems recognized by a metadata file come
//! first, then types recognized by a specific extension or content type,
//! then the generic archive formats. Tokens shared by many archive formats
//! (`application/zip`, `zip archive`, `application/x-tar`, `.exe`) are only
//! declared by the generic entries at the end.

use crate::descriptor::TypeDescriptor;
use pkgnorm_core::{Packaging, VersionScheme};

use Packaging::Archive;

/// Return the built-in descriptors in recognition order
pub fn builtin_descriptors() -> Vec<TypeDescriptor> {
    vec![
        // Metafile ecosystems
        TypeDescriptor::new("phpcomposer")
            .language("PHP")
            .metafiles(&["composer.json"]),
        TypeDescriptor::new("npm")
            .language("JavaScript")
            .version_scheme(VersionScheme::Semantic)
            .metafiles(&["package.json", "npm-shrinkwrap.json"]),
        TypeDescriptor::new("RubyGem")
            .language("Ruby")
            .packaging(Archive)
            .metafiles(&["*.gemspec", "Gemfile", "Gemfile.lock"])
            .extensions(&[".gem"]),
        TypeDescriptor::new("CPAN Perl module")
            .language("Perl")
            .metafiles(&[
                "*.pod",
                "*.pm",
                "MANIFEST",
                "Makefile.PL",
                "META.yml",
                "META.json",
                "*.meta",
                "dist.ini",
            ]),
        TypeDescriptor::new("Go package")
            .language("Go")
            .metafiles(&["Godeps"]),
        TypeDescriptor::new("Bower package")
            .language("JavaScript")
            .metafiles(&["bower.json"]),
        TypeDescriptor::new("Meteor package")
            .language("JavaScript")
            .metafiles(&["package.js"]),
        TypeDescriptor::new("Apache IVY package")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["ivy.xml"]),
        TypeDescriptor::new("nuget")
            .packaging(Archive)
            .metafiles(&["*.nuspec"])
            .extensions(&[".nupkg"]),
        TypeDescriptor::new("RPM")
            .packaging(Archive)
            .version_scheme(VersionScheme::Evr)
            .metafiles(&["*.spec"])
            .extensions(&[".rpm", ".srpm", ".mvl", ".vip"])
            .filetypes(&["rpm "])
            .mimetypes(&["application/x-rpm"]),
        TypeDescriptor::new("Debian package")
            .packaging(Archive)
            .metafiles(&["*.control"])
            .extensions(&[".deb"])
            .filetypes(&["debian binary package"])
            .mimetypes(&["application/x-archive", "application/vnd.debian.binary-package"]),
        TypeDescriptor::new("Java Web application")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["WEB-INF/web.xml"])
            .extensions(&[".war"]),
        TypeDescriptor::new("Enterprise Java application")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["META-INF/application.xml", "META-INF/ejb-jar.xml"])
            .extensions(&[".ear"]),
        TypeDescriptor::new("Apache Axis2 module")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["META-INF/module.xml"])
            .extensions(&[".mar"]),
        TypeDescriptor::new("JBoss service archive")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["META-INF/jboss-service.xml"])
            .extensions(&[".sar"]),
        TypeDescriptor::new("Java Jar")
            .language("Java")
            .packaging(Archive)
            .metafiles(&["META-INF/MANIFEST.MF"])
            .extensions(&[".jar"])
            .filetypes(&["java archive"])
            .mimetypes(&["application/java-archive"]),
        // Specific extensions and content types
        TypeDescriptor::new("Android app")
            .language("Java")
            .packaging(Archive)
            .extensions(&[".apk"]),
        TypeDescriptor::new("Android library")
            .language("Java")
            .packaging(Archive)
            .extensions(&[".aar"]),
        TypeDescriptor::new("Mozilla extension")
            .language("JavaScript")
            .packaging(Archive)
            .extensions(&[".xpi"]),
        TypeDescriptor::new("Chrome extension")
            .language("JavaScript")
            .packaging(Archive)
            .extensions(&[".crx"]),
        TypeDescriptor::new("iOS app")
            .language("Objective-C")
            .packaging(Archive)
            .extensions(&[".ipa"]),
        TypeDescriptor::new("Python package")
            .language("Python")
            .packaging(Archive)
            .extensions(&[".egg", ".whl", ".pyz", ".pex"]),
        TypeDescriptor::new("Microsoft cab")
            .packaging(Archive)
            .extensions(&[".cab"])
            .filetypes(&["microsoft cabinet"])
            .mimetypes(&["application/vnd.ms-cab-compressed"]),
        TypeDescriptor::new("Microsoft MSI Installer")
            .packaging(Archive)
            .extensions(&[".msi"])
            .filetypes(&["msi installer"])
            .mimetypes(&["application/x-msi"]),
        TypeDescriptor::new("InstallShield Installer")
            .packaging(Archive)
            .filetypes(&["installshield"]),
        TypeDescriptor::new("Nullsoft Installer")
            .packaging(Archive)
            .filetypes(&["nullsoft installer"]),
        TypeDescriptor::new("shar shell archive")
            .packaging(Archive)
            .extensions(&[".sha", ".shar", ".bin"]),
        TypeDescriptor::new("Apple dmg")
            .packaging(Archive)
            .extensions(&[".dmg", ".sparseimage"]),
        TypeDescriptor::new("ISO CD image")
            .packaging(Archive)
            .extensions(&[".iso", ".udf", ".img"])
            .filetypes(&["iso 9660 cd-rom", "high sierra cd-rom"])
            .mimetypes(&["application/x-iso9660-image"]),
        TypeDescriptor::new("squashfs image")
            .packaging(Archive)
            .filetypes(&["squashfs"]),
        // Generic archives, always last
        TypeDescriptor::new("RAR archive")
            .packaging(Archive)
            .extensions(&[".rar"])
            .filetypes(&["rar archive"])
            .mimetypes(&["application/x-rar"]),
        TypeDescriptor::new("plain tarball")
            .packaging(Archive)
            .extensions(&[
                ".tar", ".tar.xz", ".txz", ".tarxz", ".tar.lzma", ".tlz", ".tarlz", ".tarlzma",
                ".tgz", ".tar.gz", ".tar.gzip", ".targz", ".targzip", ".tgzip", ".tar.bz2",
                ".tar.bz", ".tar.bzip", ".tar.bzip2", ".tbz", ".tbz2", ".tb2", ".tarbz2",
                ".tar.7z", ".tar.7zip", ".t7z", ".tz", ".tar.z", ".tarz",
            ])
            .filetypes(&[
                "tar archive",
                "xz compressed",
                "lzma compressed",
                "gzip compressed",
                "bzip2 compressed",
                "compress'd data",
            ])
            .mimetypes(&[
                "application/x-xz",
                "application/x-tar",
                "application/x-lzma",
                "application/x-gzip",
                "application/x-bzip2",
                "application/x-compress",
            ]),
        TypeDescriptor::new("plain zip")
            .packaging(Archive)
            .extensions(&[".zip", ".zipx", ".7z"])
            .filetypes(&["zip archive", "7-zip archive"])
            .mimetypes(&["application/zip", "application/x-7z-compressed"]),
    ]
}
