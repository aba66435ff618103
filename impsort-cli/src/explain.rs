//! Strategy explanations for the `impsort explain` command.

use impsort_types::strategy::StrategyKind;

/// What one sort strategy does.
#[derive(Debug, Clone)]
pub struct StrategyExplanation {
    pub kind: StrategyKind,
    /// Config name (e.g., "pathDepth").
    pub key: &'static str,
    pub title: &'static str,
    /// Whether later strategies in the chain can still refine its ties.
    pub refinable: bool,
    pub description: &'static str,
    pub example: &'static str,
}

/// Registry of all strategy explanations.
pub static STRATEGY_REGISTRY: &[StrategyExplanation] = &[
    StrategyExplanation {
        kind: StrategyKind::LineLength,
        key: "lineLength",
        title: "Line Length",
        refinable: true,
        description: r#"Orders imports by the length of the whole statement, counted in UTF-16 code units.

Statements of equal length form one bucket; the next strategy in the chain
decides their order. With DESC the longest statements come first."#,
        example: r#"import fs from 'fs';
import path from 'path';
import lodash from 'lodash';"#,
    },
    StrategyExplanation {
        kind: StrategyKind::PathDepth,
        key: "pathDepth",
        title: "Path Depth",
        refinable: true,
        description: r#"Orders imports by how far up the tree their module path reaches.

Package imports (no leading `.`) have depth -1, `./x` has depth 0, and every
`../` adds one. ASC puts packages first, then the deepest relative paths down
to `./`. DESC runs from `./` to the deepest path and puts packages last.
Equal depths form one bucket for the next strategy."#,
        example: r#"import React from 'react';
import helper from '../../helper';
import config from '../config';
import utils from './utils';"#,
    },
    StrategyExplanation {
        kind: StrategyKind::Alphabetical,
        key: "alphabetical",
        title: "Alphabetical",
        refinable: false,
        description: r#"Orders imports by the first local name they bind (default, namespace or
first named specifier), falling back to the module path for side-effect
imports.

Comparison ignores case, accents and punctuation. Ties keep their current
order, and no later strategy in the chain is consulted."#,
        example: r#"import { api } from './api';
import Button from './Button';
import * as colors from './colors';"#,
    },
    StrategyExplanation {
        kind: StrategyKind::Filename,
        key: "filename",
        title: "Filename",
        refinable: false,
        description: r#"Orders imports by the file name of their module path: the last path segment
without its extension, or `@scope/name` for scoped packages. Alias prefixes
(`@/`, `~/`) are dropped first.

Comparison ignores case, accents and punctuation. Ties keep their current
order, and no later strategy in the chain is consulted."#,
        example: r#"import { Header } from '@/components/Header';
import { main } from './main.ts';
import { z } from 'zod';"#,
    },
];

/// Look up a strategy by its config name or any accepted spelling.
pub fn lookup_strategy(query: &str) -> Option<&'static StrategyExplanation> {
    let kind = StrategyKind::parse(query);
    STRATEGY_REGISTRY.iter().find(|s| s.kind == kind)
}

/// List all strategy keys.
pub fn list_strategy_keys() -> Vec<&'static str> {
    STRATEGY_REGISTRY.iter().map(|s| s.key).collect()
}
