//! Lowering: build the element tree from a parsed build script.
//!
//! Every statement becomes one element (or merges into one) under the block
//! that holds it. Dotted names are followed through known child blocks, so
//! `android.defaultConfig.minSdkVersion 21` lands in `defaultConfig`.
//! Collection properties accumulate: appends extend the current list and map
//! augmentations merge keys into the current map.

use rowan::TextRange;
use smol_str::SmolStr;
use tracing::trace;

use super::element::{
    CollectionKind, ElementId, ElementKind, ElementList, ElementState, ElementType, ExternalSyntax,
    SyntaxHandle,
};
use super::name::DslName;
use super::tree::DslTree;
use super::value::LiteralValue;
use crate::converter::{model_description_for_parent, model_effect};
use crate::parser::ast::{
    self, Arg, ArgList, AstNode, BlockStmt, Expr, InfixStmt, Name, NamedArg, SourceFile, Statement,
    VariableDecl,
};
use crate::parser::{Parse, SyntaxKind};
use crate::semantics::{
    BlockKind, ModelEffectDescription, ModelPropertyType, NAMED_CONTAINER_METHODS, SemanticsDescription,
};

const MAP_FUNCTIONS: &[&str] = &["mapOf", "mutableMapOf", "hashMapOf", "linkedMapOf"];
const LIST_APPEND_METHODS: &[&str] = &["add", "addAll"];
const MAP_PUT_METHODS: &[&str] = &["put", "putAll"];

/// Lower a parsed file into the root block of `tree`
pub(crate) fn lower_file(tree: &mut DslTree, parse: &Parse) {
    let Some(file) = SourceFile::cast(parse.syntax()) else {
        return;
    };
    let root = tree.root();
    let mut lowerer = Lowerer { tree };
    for statement in file.statements() {
        lowerer.statement(root, statement);
    }
}

struct Lowerer<'t> {
    tree: &'t mut DslTree,
}

/// Where a dotted statement name lands
struct Target {
    holder: ElementId,
    rest: Vec<String>,
    navigated: bool,
}

impl Target {
    fn name(&self) -> String {
        self.rest.join(".")
    }
}

impl Lowerer<'_> {
    fn statement(&mut self, container: ElementId, statement: Statement) {
        let range = statement.range();
        match statement {
            Statement::Block(block) => self.block(container, &block),
            Statement::Assignment(assignment) => {
                if let Some(name) = assignment.name() {
                    self.assignment(container, &name, assignment.value(), range, false);
                }
            }
            Statement::AugmentedAssignment(assignment) => {
                if let Some(name) = assignment.name() {
                    self.assignment(container, &name, assignment.value(), range, true);
                }
            }
            Statement::Application(application) => {
                if let Some(name) = application.name() {
                    self.call(container, &name, application.args(), range, SyntaxKind::APPLICATION);
                }
            }
            Statement::Call(call) => {
                if let Some(name) = call.name() {
                    self.call(container, &name, call.args(), range, SyntaxKind::CALL_STMT);
                }
            }
            Statement::Infix(infix) => self.infix(container, &infix),
            Statement::VariableDecl(decl) => self.variable(container, &decl),
            Statement::Name(stmt) => {
                if let Some(name) = stmt.name() {
                    let text = name.segments().join(".");
                    let id = self
                        .tree
                        .new_literal(DslName::new(&text), LiteralValue::String(text.clone()));
                    self.set_backing(id, SyntaxHandle::for_statement(SyntaxKind::NAME_STMT, range));
                    self.tree.add_parsed_element(container, id);
                }
            }
            Statement::Unknown(_) => trace!(?range, "skipping unrecognised statement"),
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Follow the leading segments of a dotted name through child blocks,
    /// creating implicit blocks for declared children that have no text yet.
    fn navigate(&mut self, container: ElementId, segments: Vec<String>) -> Target {
        let mut holder = container;
        let mut rest = segments;
        let mut navigated = false;
        let dialect = self.tree.dialect();

        while rest.len() > 1 {
            let next = match self.tree.get_block(holder, &rest[0]) {
                Some(block) => block,
                None => {
                    let kind = self.tree.block_kind(holder).unwrap_or(BlockKind::Generic);
                    if kind.known_child_block(&rest[0], dialect).is_none() && !kind.is_named_container() {
                        break;
                    }
                    let block = self
                        .tree
                        .new_block(DslName::new(&rest[0]), kind.child_block(&rest[0], dialect));
                    self.tree.set_element_type(block, ElementType::Derived);
                    self.tree.add_parsed_element(holder, block);
                    block
                }
            };
            holder = next;
            rest.remove(0);
            navigated = true;
        }

        Target {
            holder,
            rest,
            navigated,
        }
    }

    fn property_type(&self, holder: ElementId, external: &str) -> Option<ModelPropertyType> {
        model_description_for_parent(self.tree, external, holder).map(|p| p.ty)
    }

    fn model_name(&self, holder: ElementId, external: &str) -> String {
        model_description_for_parent(self.tree, external, holder)
            .map_or_else(|| external.to_string(), |p| p.name.to_string())
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn block(&mut self, container: ElementId, stmt: &BlockStmt) {
        let Some(name) = stmt.name() else {
            return;
        };
        let range = stmt.range();
        let mut segments = name.segments();
        let mut header = None;

        // `create("staging") { }` names the block by its argument
        if let Some(method) = segments.last().filter(|m| NAMED_CONTAINER_METHODS.contains(&m.as_str())) {
            if let Some(arg) = stmt.args().as_ref().and_then(single_string_arg) {
                header = Some(SmolStr::new(method));
                segments.pop();
                segments.push(arg);
            }
        }

        let target = self.navigate(container, segments);
        let block_name = target.name();
        let dialect = self.tree.dialect();
        let parent_kind = self.tree.block_kind(target.holder).unwrap_or(BlockKind::Generic);

        let block = match self.tree.get_block(target.holder, &block_name) {
            Some(existing) => existing,
            None => {
                let id = self
                    .tree
                    .new_block(DslName::new(&block_name), parent_kind.child_block(&block_name, dialect));
                self.tree.add_parsed_element(target.holder, id);
                id
            }
        };

        if self.tree.element(block).raw_backing().is_none() {
            let mut handle = SyntaxHandle::for_statement(SyntaxKind::BLOCK_STMT, range);
            if let Some(body) = stmt.body() {
                handle = handle.with_body(body.range());
            }
            handle.qualified = target.navigated;
            self.set_backing(block, handle);
            self.tree.set_element_type(block, ElementType::Regular);
            if let ElementKind::Block { header: slot, .. } = &mut self.tree.element_mut(block).kind {
                *slot = header;
            }
        }
        trace!(block = %block_name, "lowered block");

        if let Some(body) = stmt.body() {
            for statement in body.statements() {
                self.statement(block, statement);
            }
        }
    }

    fn assignment(
        &mut self,
        container: ElementId,
        name: &Name,
        value: Option<Expr>,
        range: TextRange,
        augmented: bool,
    ) {
        let kind = if augmented {
            SyntaxKind::AUGMENTED_ASSIGNMENT
        } else {
            SyntaxKind::ASSIGNMENT
        };
        let target = self.navigate(container, name.segments());
        let Some(value) = value else {
            return;
        };
        let holder = target.holder;

        if target.rest.len() == 2
            && self.property_type(holder, &target.rest[0]) == Some(ModelPropertyType::MutableMap)
        {
            let entry = self.expr(DslName::single(target.rest[1].as_str()), &value, range);
            self.promote(entry, kind, range, true);
            let map = self.current_map(holder, &target.rest[0]);
            self.merge_entry(map, entry);
            return;
        }

        let external = target.name();
        let effect = model_effect(self.tree, &external, None, holder);
        let id = self.expr(DslName::new(&external), &value, range);
        self.promote(id, kind, range, target.navigated);

        if augmented {
            let model_name = self.model_name(holder, &external);
            if let Some(current) = self.tree.get_property_element(holder, &model_name) {
                if self.absorb(current, id) {
                    return;
                }
            }
        }

        let syntax = if augmented {
            ExternalSyntax::AugmentedAssignment
        } else {
            ExternalSyntax::Assignment
        };
        self.attach(holder, id, effect, syntax);
    }

    fn call(
        &mut self,
        container: ElementId,
        name: &Name,
        args: Option<ArgList>,
        range: TextRange,
        kind: SyntaxKind,
    ) {
        let target = self.navigate(container, name.segments());
        let holder = target.holder;
        let args: Vec<Arg> = args.iter().flat_map(|list| list.args()).collect();
        let positional: Vec<Expr> = args
            .iter()
            .filter_map(|arg| match arg {
                Arg::Positional(expr) => Some(expr.clone()),
                Arg::Named(_) => None,
            })
            .collect();
        let named: Vec<NamedArg> = args
            .iter()
            .filter_map(|arg| match arg {
                Arg::Named(named) => Some(named.clone()),
                Arg::Positional(_) => None,
            })
            .collect();
        let value_range = args
            .first()
            .zip(args.last())
            .map(|(first, last)| first.syntax().text_range().cover(last.syntax().text_range()));

        // `proguardFiles.add("x")`, `manifestPlaceholders.put("k", "v")`
        if target.rest.len() == 2 {
            let ty = self.property_type(holder, &target.rest[0]);
            let method = target.rest[1].as_str();
            let augments = match ty {
                Some(ModelPropertyType::MutableList | ModelPropertyType::MutableSet) => {
                    LIST_APPEND_METHODS.contains(&method)
                }
                Some(ModelPropertyType::MutableMap) => MAP_PUT_METHODS.contains(&method),
                _ => false,
            };
            if augments {
                let property = target.rest[0].clone();
                self.augment_collection(holder, &property, &positional, &named, range, kind);
                return;
            }
        }

        let external = target.name();
        let count = positional.len() + usize::from(!named.is_empty());
        let effect = model_effect(self.tree, &external, Some(count), holder);
        let semantics = effect.map(|e| e.semantics);

        match semantics {
            Some(SemanticsDescription::AugmentList | SemanticsDescription::AddAsList) => {
                let items = self.items(&positional, range);
                let model_name = self.model_name(holder, &external);
                let current = self
                    .tree
                    .get_property_element(holder, &model_name)
                    .filter(|&id| matches!(self.tree.element(id).kind, ElementKind::List { .. }));
                match current {
                    Some(list) => self.push_items(list, items),
                    None => {
                        let list = self.tree.new_list(DslName::new(&external), CollectionKind::Varargs);
                        self.set_backing(list, statement_handle(kind, range, value_range, target.navigated));
                        self.push_items(list, items);
                        self.attach(holder, list, effect, ExternalSyntax::Method);
                    }
                }
            }
            Some(SemanticsDescription::AugmentMap) => {
                let property = external.clone();
                self.augment_collection(holder, &property, &positional, &named, range, kind);
            }
            Some(_) if positional.len() == 1 && named.is_empty() => {
                let id = self.expr(DslName::new(&external), &positional[0], range);
                self.promote(id, kind, range, target.navigated);
                let syntax = if is_setter_name(&external) {
                    ExternalSyntax::SetMethod
                } else {
                    ExternalSyntax::Method
                };
                self.attach(holder, id, effect, syntax);
            }
            None if positional.len() == 1 && named.is_empty() && kind == SyntaxKind::APPLICATION => {
                let id = self.expr(DslName::new(&external), &positional[0], range);
                self.promote(id, kind, range, target.navigated);
                self.attach(holder, id, None, ExternalSyntax::Method);
            }
            _ if positional.is_empty() && !named.is_empty() => {
                let map = self.tree.new_map(DslName::new(&external), false);
                self.set_backing(map, statement_handle(kind, range, value_range, target.navigated));
                for arg in &named {
                    if let Some(entry) = self.named_arg(arg, range) {
                        self.push_items(map, vec![entry]);
                    }
                }
                self.attach(holder, map, effect, ExternalSyntax::Method);
            }
            _ => {
                let method = target.rest.last().map_or("", String::as_str).to_string();
                let call = self.tree.new_method_call(DslName::new(&external), &method);
                self.set_backing(call, statement_handle(kind, range, value_range, target.navigated));
                let mut items = self.items(&positional, range);
                items.extend(named.iter().filter_map(|arg| self.named_arg(arg, range)));
                self.push_items(call, items);
                self.attach(holder, call, effect, ExternalSyntax::Method);
            }
        }
    }

    /// `manifestPlaceholders k: v`, `testInstrumentationRunnerArgument "k", "v"`,
    /// `proguardFiles.add("x")` and friends
    fn augment_collection(
        &mut self,
        holder: ElementId,
        external: &str,
        positional: &[Expr],
        named: &[NamedArg],
        range: TextRange,
        kind: SyntaxKind,
    ) {
        let ty = self.property_type(holder, external);
        if ty == Some(ModelPropertyType::MutableMap) {
            let map = self.current_map(holder, external);
            if positional.len() == 2 && named.is_empty() {
                let key = literal_string(&positional[0]);
                if let Some(key) = key {
                    let entry = self.expr(DslName::single(key.as_str()), &positional[1], range);
                    self.promote(entry, kind, range, false);
                    self.merge_entry(map, entry);
                }
                return;
            }
            for arg in named {
                if let Some(entry) = self.named_arg(arg, range) {
                    self.merge_entry(map, entry);
                }
            }
            for expr in positional {
                let value = self.expr(DslName::empty(), expr, range);
                self.absorb(map, value);
            }
            return;
        }

        let model_name = self.model_name(holder, external);
        let items = self.items(positional, range);
        let current = self
            .tree
            .get_property_element(holder, &model_name)
            .filter(|&id| matches!(self.tree.element(id).kind, ElementKind::List { .. }));
        let list = match current {
            Some(list) => list,
            None => {
                let list = self.tree.new_list(DslName::new(external), CollectionKind::Varargs);
                self.tree.set_element_type(list, ElementType::Derived);
                let effect = model_effect(self.tree, external, None, holder);
                self.attach(holder, list, effect, ExternalSyntax::Method);
                list
            }
        };
        self.push_items(list, items);
    }

    fn infix(&mut self, container: ElementId, stmt: &InfixStmt) {
        let range = stmt.range();
        let parts: Vec<_> = stmt.parts().collect();
        let Some(first) = parts.first().and_then(|part| part.name()) else {
            return;
        };
        let infix = self.tree.new_infix(DslName::new(&first.segments().join(".")));
        self.set_backing(infix, SyntaxHandle::for_statement(SyntaxKind::INFIX_STMT, range));

        let mut slots = Vec::new();
        for part in &parts {
            let (Some(name), Some(value)) = (part.name(), part.value()) else {
                continue;
            };
            let slot = self.expr(DslName::single(name.segments().join(".")), &value, range);
            let mut handle = SyntaxHandle::for_item(SyntaxKind::INFIX_PART, part.range(), range)
                .with_value(value.range());
            handle.body = self.tree.element(slot).raw_backing().and_then(|h| h.body);
            self.set_backing(slot, handle);
            slots.push(slot);
        }
        self.push_items(infix, slots);
        self.tree.set_external_syntax(infix, ExternalSyntax::Method);
        self.tree.add_parsed_element(container, infix);
    }

    fn variable(&mut self, container: ElementId, decl: &VariableDecl) {
        let (Some(name), Some(value)) = (decl.name(), decl.value()) else {
            return;
        };
        let value = if decl.is_delegated() {
            match delegate_initializer(&value) {
                Some(initial) => initial,
                None => return,
            }
        } else {
            value
        };
        let range = decl.range();
        let id = self.expr(DslName::new(&name.segments().join(".")), &value, range);
        self.promote(id, SyntaxKind::VARIABLE_DECL, range, false);
        self.tree.set_element_type(id, ElementType::Variable);
        self.tree.set_external_syntax(id, ExternalSyntax::Assignment);
        self.tree.add_parsed_element(container, id);
    }

    // =========================================================================
    // Merging
    // =========================================================================

    fn attach(
        &mut self,
        holder: ElementId,
        id: ElementId,
        effect: Option<ModelEffectDescription>,
        syntax: ExternalSyntax,
    ) {
        self.tree.set_effect(id, effect);
        self.tree.set_external_syntax(id, syntax);
        self.tree.add_parsed_element(holder, id);
    }

    /// The current map for a map property, created without text if missing
    fn current_map(&mut self, holder: ElementId, external: &str) -> ElementId {
        let model_name = self.model_name(holder, external);
        let current = self
            .tree
            .get_property_element(holder, &model_name)
            .filter(|&id| matches!(self.tree.element(id).kind, ElementKind::Map { .. }));
        if let Some(map) = current {
            return map;
        }
        let map = self.tree.new_map(DslName::new(external), true);
        self.tree.set_element_type(map, ElementType::Derived);
        let effect = model_effect(self.tree, external, None, holder)
            .or_else(|| model_effect(self.tree, external, Some(1), holder));
        self.attach(holder, map, effect, ExternalSyntax::Assignment);
        map
    }

    /// Merge `value` into an existing collection; false if shapes differ
    fn absorb(&mut self, current: ElementId, value: ElementId) -> bool {
        let current_kind = &self.tree.element(current).kind;
        let value_kind = &self.tree.element(value).kind;
        match (current_kind, value_kind) {
            (ElementKind::List { .. }, ElementKind::List { .. }) => {
                let items = self.tree.children(value);
                self.push_items(current, items);
                true
            }
            (ElementKind::List { .. }, ElementKind::Literal(_)) => {
                self.push_items(current, vec![value]);
                true
            }
            (ElementKind::Map { .. }, ElementKind::Map { .. }) => {
                for entry in self.tree.children(value) {
                    self.merge_entry(current, entry);
                }
                true
            }
            _ => false,
        }
    }

    /// Add a keyed entry: a repeated key keeps its first position and takes
    /// the new value.
    fn merge_entry(&mut self, map: ElementId, entry: ElementId) {
        let key = self.tree.element(entry).name().full();
        let existing = self
            .tree
            .children(map)
            .into_iter()
            .find(|&id| self.tree.element(id).name().full() == key);
        match existing {
            Some(old) => {
                if let Some(items) = self.tree.element_mut(map).kind.children_mut() {
                    items.replace_id(old, entry, ElementState::Existing);
                }
                self.tree.element_mut(entry).parent = Some(map);
                self.tree.element_mut(old).parent = None;
                trace!(%key, "map key redefined");
            }
            None => self.push_items(map, vec![entry]),
        }
    }

    fn push_items(&mut self, container: ElementId, items: Vec<ElementId>) {
        for item in items {
            self.tree.add_parsed_element(container, item);
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Lower positional arguments into list items; bracketed literals are
    /// flattened into their items.
    fn items(&mut self, args: &[Expr], statement: TextRange) -> Vec<ElementId> {
        let mut items = Vec::new();
        for arg in args {
            let id = self.expr(DslName::empty(), arg, statement);
            if matches!(self.tree.element(id).kind, ElementKind::List { .. }) {
                items.extend(self.tree.children(id));
                if let Some(list_items) = self.tree.element_mut(id).kind.children_mut() {
                    *list_items = ElementList::new();
                }
            } else {
                self.tree.set_element_type(id, ElementType::Fake);
                items.push(id);
            }
        }
        items
    }

    fn named_arg(&mut self, arg: &NamedArg, statement: TextRange) -> Option<ElementId> {
        let key = arg.key()?;
        let value = arg.value()?;
        let id = self.expr(DslName::single(key.as_str()), &value, statement);
        let mut handle = SyntaxHandle::for_item(SyntaxKind::NAMED_ARG, arg.range(), statement)
            .with_value(value.range());
        handle.body = self.tree.element(id).raw_backing().and_then(|h| h.body);
        self.set_backing(id, handle);
        Some(id)
    }

    fn expr(&mut self, name: DslName, expr: &Expr, statement: TextRange) -> ElementId {
        let range = expr.range();
        let handle = SyntaxHandle::for_item(expr.syntax().kind(), range, statement).with_value(range);

        let id = match expr {
            Expr::Literal(literal) => self.tree.new_literal(name, literal_value(literal)),
            Expr::Reference(reference) if reference.is_simple() => self
                .tree
                .new_literal(name, LiteralValue::Reference(reference.path())),
            Expr::List(list) => {
                let id = self.tree.new_list(name, CollectionKind::Bracket);
                let items: Vec<_> = list.items().collect();
                self.enclosed_items(id, &items, statement);
                self.set_backing(id, handle.with_body(range));
                return id;
            }
            Expr::Map(map) => {
                let id = self.tree.new_map(name, true);
                for entry in map.entries() {
                    let (Some(key), Some(value)) = (entry.key(), entry.value()) else {
                        continue;
                    };
                    let item = self.expr(DslName::single(key.as_str()), &value, statement);
                    let mut item_handle = SyntaxHandle::for_item(SyntaxKind::MAP_ENTRY, entry.range(), statement)
                        .with_value(value.range());
                    item_handle.enclosed = true;
                    item_handle.body = self.tree.element(item).raw_backing().and_then(|h| h.body);
                    self.set_backing(item, item_handle);
                    self.merge_entry(id, item);
                }
                self.set_backing(id, handle.with_body(range));
                return id;
            }
            Expr::Call(call) => return self.call_expr(name, call, handle, statement),
            Expr::Paren(paren) => {
                match paren.syntax().children().find_map(Expr::cast) {
                    Some(inner) => return self.expr(name, &inner, statement),
                    None => self.tree.new_literal(name, LiteralValue::Raw(expr.text())),
                }
            }
            Expr::Index(index) => {
                let path = match (index.base(), index.index()) {
                    (Some(Expr::Reference(base)), Some(key)) if base.is_simple() => {
                        literal_string(&key).map(|key| format!("{}.{key}", base.path()))
                    }
                    _ => None,
                };
                let value = path.map_or_else(|| LiteralValue::Raw(expr.text()), LiteralValue::Reference);
                self.tree.new_literal(name, value)
            }
            Expr::Reference(_)
            | Expr::Pair(_)
            | Expr::Closure(_)
            | Expr::Binary(_) => self.tree.new_literal(name, LiteralValue::Raw(expr.text())),
        };
        self.set_backing(id, handle);
        id
    }

    fn call_expr(
        &mut self,
        name: DslName,
        call: &ast::CallExpr,
        handle: SyntaxHandle,
        statement: TextRange,
    ) -> ElementId {
        let callee = call.callee().unwrap_or_default();
        let args: Vec<Arg> = call.args().iter().flat_map(|list| list.args()).collect();
        let body = call.args().map_or(handle.range, |list| list.range());

        if let Some(collection) = CollectionKind::from_function(&callee) {
            let id = self.tree.new_list(name, collection);
            let items: Vec<Expr> = args
                .into_iter()
                .filter_map(|arg| match arg {
                    Arg::Positional(expr) => Some(expr),
                    Arg::Named(_) => None,
                })
                .collect();
            self.enclosed_items(id, &items, statement);
            self.set_backing(id, handle.with_body(body));
            return id;
        }

        if MAP_FUNCTIONS.contains(&callee.as_str()) {
            let id = self.tree.new_map(name, true);
            for arg in args {
                let Arg::Positional(Expr::Pair(pair)) = arg else {
                    continue;
                };
                let (Some(key), Some(value)) = (pair.first(), pair.second()) else {
                    continue;
                };
                let Some(key) = literal_string(&key) else {
                    continue;
                };
                let item = self.expr(DslName::single(key.as_str()), &value, statement);
                let mut item_handle = SyntaxHandle::for_item(SyntaxKind::PAIR_EXPR, pair.range(), statement)
                    .with_value(value.range());
                item_handle.enclosed = true;
                self.set_backing(item, item_handle);
                self.merge_entry(id, item);
            }
            self.set_backing(id, handle.with_body(body));
            return id;
        }

        let method = callee.rsplit('.').next().unwrap_or_default().to_string();
        let id = self.tree.new_method_call(name, &method);
        let mut items = Vec::new();
        for arg in args {
            let item = match arg {
                Arg::Positional(expr) => {
                    let item = self.expr(DslName::empty(), &expr, statement);
                    self.tree.set_element_type(item, ElementType::Fake);
                    item
                }
                Arg::Named(named) => match self.named_arg(&named, statement) {
                    Some(item) => item,
                    None => continue,
                },
            };
            if let Some(h) = self.tree.element_mut(item).backing.as_mut() {
                h.enclosed = true;
            }
            items.push(item);
        }
        self.push_items(id, items);
        self.set_backing(id, handle.with_body(body));
        id
    }

    fn enclosed_items(&mut self, list: ElementId, items: &[Expr], statement: TextRange) {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = self.expr(DslName::empty(), item, statement);
            self.tree.set_element_type(id, ElementType::Fake);
            if let Some(handle) = self.tree.element_mut(id).backing.as_mut() {
                handle.enclosed = true;
            }
            ids.push(id);
        }
        self.push_items(list, ids);
    }

    fn set_backing(&mut self, id: ElementId, handle: SyntaxHandle) {
        self.tree.element_mut(id).backing = Some(handle);
    }

    /// Turn an expression's item handle into a statement handle
    fn promote(&mut self, id: ElementId, kind: SyntaxKind, statement: TextRange, qualified: bool) {
        if let Some(handle) = self.tree.element_mut(id).backing.as_mut() {
            handle.kind = kind;
            handle.range = statement;
            handle.statement = statement;
            handle.enclosed = false;
            handle.qualified = qualified;
        }
    }
}

fn statement_handle(
    kind: SyntaxKind,
    range: TextRange,
    value: Option<TextRange>,
    qualified: bool,
) -> SyntaxHandle {
    let mut handle = SyntaxHandle::for_statement(kind, range);
    handle.value = value;
    handle.qualified = qualified;
    handle
}

/// `setManifestPlaceholders`, not `settings`
fn is_setter_name(name: &str) -> bool {
    name.strip_prefix("set")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

fn single_string_arg(args: &ArgList) -> Option<String> {
    let mut positional = args.args().filter_map(|arg| match arg {
        Arg::Positional(expr) => Some(expr),
        Arg::Named(_) => None,
    });
    let first = positional.next()?;
    if positional.next().is_some() {
        return None;
    }
    literal_string(&first)
}

/// The initial value `1` of the `extra(1)` delegate
fn delegate_initializer(expr: &Expr) -> Option<Expr> {
    let Expr::Call(call) = expr else {
        return None;
    };
    if call.callee()? != "extra" {
        return None;
    }
    let args = call.args()?;
    let mut positional = args.args().filter_map(|arg| match arg {
        Arg::Positional(expr) => Some(expr),
        Arg::Named(_) => None,
    });
    let first = positional.next()?;
    positional.next().is_none().then_some(first)
}

/// The content of a plain string literal expression
fn literal_string(expr: &Expr) -> Option<String> {
    let Expr::Literal(literal) = expr else {
        return None;
    };
    match literal_value(literal) {
        LiteralValue::String(s) => Some(s),
        _ => None,
    }
}

fn literal_value(literal: &ast::Literal) -> LiteralValue {
    let Some(token) = literal.token() else {
        return LiteralValue::Raw(literal.syntax().text().to_string());
    };
    let text = token.text();
    let sign = if literal.is_negative() { "-" } else { "" };

    match token.kind() {
        SyntaxKind::STRING => LiteralValue::String(ast::unquote_string(text)),
        SyntaxKind::GSTRING | SyntaxKind::TRIPLE_STRING if has_interpolation(text) => {
            LiteralValue::Interpolated(strip_quotes(text).to_string())
        }
        SyntaxKind::GSTRING | SyntaxKind::TRIPLE_STRING => LiteralValue::String(ast::unquote_string(text)),
        SyntaxKind::INTEGER => parse_integer(text)
            .map(|n| if literal.is_negative() { -n } else { n })
            .map_or_else(|| LiteralValue::Raw(format!("{sign}{text}")), LiteralValue::Integer),
        SyntaxKind::DECIMAL => LiteralValue::Decimal(format!("{sign}{text}")),
        SyntaxKind::TRUE_KW => LiteralValue::Boolean(true),
        SyntaxKind::FALSE_KW => LiteralValue::Boolean(false),
        SyntaxKind::NULL_KW => LiteralValue::Null,
        _ => LiteralValue::Raw(literal.syntax().text().to_string()),
    }
}

/// A double-quoted string with an unescaped `$`
fn has_interpolation(text: &str) -> bool {
    if text.starts_with('\'') {
        return false;
    }
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'$' && (i == 0 || bytes[i - 1] != b'\\'))
}

fn strip_quotes(text: &str) -> &str {
    ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find_map(|q| {
            text.strip_prefix(q)
                .and_then(|t| t.strip_suffix(q))
                .filter(|_| text.len() >= 2 * q.len())
        })
        .unwrap_or(text)
}

fn parse_integer(text: &str) -> Option<i64> {
    let digits: String = text
        .trim_end_matches(['L', 'l'])
        .chars()
        .filter(|&c| c != '_')
        .collect();
    match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => digits.parse().ok(),
    }
}
