//! The generated-file templates.
//!
//! One entry per file the provisioning saga writes into a fresh repository.
//! Variables are the Context facts plus the request fields; `render`
//! rejects anything left unbound.

/// A file the saga knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    DomainReadme,
    DefinitionReadme,
    Gitattributes,
    Gitignore,
    /// One `__init__.py` per package-path segment.
    Init,
    DefinitionFlake,
    PyprojectTemplate,
}

impl Template {
    /// File name the rendered output is written as.
    pub fn file_name(self) -> &'static str {
        match self {
            Template::DomainReadme | Template::DefinitionReadme => "README.md",
            Template::Gitattributes => ".gitattributes",
            Template::Gitignore => ".gitignore",
            Template::Init => "__init__.py",
            Template::DefinitionFlake => "flake.nix",
            Template::PyprojectTemplate => "pyproject.toml.template",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Template::DomainReadme => DOMAIN_README,
            Template::DefinitionReadme => DEFINITION_README,
            Template::Gitattributes => GITATTRIBUTES,
            Template::Gitignore => GITIGNORE,
            Template::Init => INIT,
            Template::DefinitionFlake => DEFINITION_FLAKE,
            Template::PyprojectTemplate => PYPROJECT_TEMPLATE,
        }
    }
}

const DOMAIN_README: &str = r#"# {{name}}

{{description}}

This package provides the `{{package}}` domain.

## Repositories

- Domain repository: {{url}}
- Definition repository: {{def_url}}

## How to run {{org}}/{{name}}

Use the definition repository:

``` sh
nix run 'github:{{def_org}}/{{name}}?dir=nix'
```
"#;

const DEFINITION_README: &str = r#"# {{name}} definition

Definition repository for [{{org}}/{{name}}]({{url}}): {{description}}

## Usage

``` sh
nix run 'github:{{def_org}}/{{name}}?dir=nix'
```

The domain code itself lives in [{{url}}]({{url}}).
"#;

const GITATTRIBUTES: &str = r#"* text=auto eol=lf
*.py diff=python
flake.lock linguist-generated=true
"#;

const GITIGNORE: &str = r#"__pycache__/
*.py[cod]
*.egg-info/
.env
.direnv/
dist/
result
"#;

const INIT: &str = r#"# vim: set fileencoding=utf-8
"""
{{path}}/__init__.py

This file ensures {{package}} is a package.

Copyright (C) {{year}}-today {{org}}'s {{org}}/{{name}}

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.
"""
__path__ = __import__("pkgutil").extend_path(__path__, __name__)
"#;

const DEFINITION_FLAKE: &str = r#"{
  description = "{{description}}";
  inputs = rec {
    flake-utils.url = "github:numtide/flake-utils/v1.0.0";
    nixpkgs.url = "github:NixOS/nixpkgs/23.11";
  };
  outputs = inputs:
    with inputs;
    flake-utils.lib.eachDefaultSystem (system:
      let
        pkgs = import nixpkgs { inherit system; };
        version = "{{version}}";
        src = pkgs.fetchzip {
          url = "{{url}}/archive/${version}.tar.gz";
          sha256 = "0000000000000000000000000000000000000000000000000000";
        };
      in rec {
        packages.default = pkgs.python3Packages.buildPythonPackage {
          pname = "{{name}}";
          inherit version src;
          format = "pyproject";
        };
      });
}
"#;

const PYPROJECT_TEMPLATE: &str = r#"[build-system]
requires = ["poetry-core"]
build-backend = "poetry.core.masonry.api"

[tool.poetry]
name = "{{package}}"
version = "{{version}}"
description = "{{description}}"
authors = ["{{org}}"]
homepage = "{{url}}"
packages = [{ include = "{{package_root}}" }]
"#;
